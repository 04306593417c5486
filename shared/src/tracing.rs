use tracing::Span;

pub async fn record_error<
    T,
    E: std::fmt::Display,
    F: FnOnce() -> R,
    R: std::future::Future<Output = Result<T, E>>,
>(
    func: F,
) -> Result<T, E> {
    let result = func().await;
    if let Err(ref e) = result {
        insert_error_fields(e);
    }
    result
}

/// Requires the current span to declare `error` and `error.message` fields.
pub fn insert_error_fields(error: impl std::fmt::Display) {
    Span::current().record("error", &tracing::field::display("true"));
    Span::current().record("error.message", &tracing::field::display(error));
}
