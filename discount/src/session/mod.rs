mod input;

use tokio::sync::{watch, RwLock};
use tracing::instrument;

use std::sync::Arc;

use crate::{calculator::*, debounce::Debouncer, traits::PricingProvider};
use pricing_client::PricingRequest;
use shared::tracing::insert_error_fields;

pub use input::*;

struct Ticket {
    sequence: u64,
    request: PricingRequest,
}

enum Reconciliation {
    Priced(ServerPricing),
    Fallback,
}

#[derive(Default)]
struct PricingSlot {
    sequence: u64,
    input: Option<BookingInput>,
    server: Option<ServerPricing>,
    loading: bool,
}

struct Inner<P> {
    calculator: DiscountCalculator,
    composer: MessageComposer,
    provider: P,
    slot: RwLock<PricingSlot>,
    results: watch::Sender<DiscountResult>,
}

/// Discount state for one booking screen. Every input change is evaluated
/// immediately; reconciliation with the backend is debounced and only the
/// response to the most recent change is ever applied.
pub struct DiscountSession<P: PricingProvider> {
    inner: Arc<Inner<P>>,
    debouncer: Debouncer<Ticket>,
}

impl<P: PricingProvider> DiscountSession<P> {
    /// Must be called from within a tokio runtime.
    pub fn new(config: DiscountConfig, provider: P) -> Self {
        let debounce = config.debounce;
        let calculator = DiscountCalculator::new(config);
        let composer = MessageComposer::new(calculator.threshold());
        let (results, _) = watch::channel(DiscountResult::default());
        let inner = Arc::new(Inner {
            calculator,
            composer,
            provider,
            slot: RwLock::new(PricingSlot::default()),
            results,
        });

        let reconciler = Arc::clone(&inner);
        let debouncer = Debouncer::new(debounce, move |ticket| {
            let inner = Arc::clone(&reconciler);
            async move { inner.reconcile(ticket).await }
        });

        Self { inner, debouncer }
    }

    #[instrument(name = "discount.update", skip_all, fields(mode = ?input.mode, sequence))]
    pub async fn update(&self, input: BookingInput) -> DiscountResult {
        let mut slot = self.inner.slot.write().await;
        slot.sequence += 1;
        let sequence = slot.sequence;
        tracing::Span::current().record("sequence", sequence);

        let calculator = &self.inner.calculator;
        let (foreign, base) = input.amounts();
        let eligible = calculator.can_show_discount(
            input.client.is_guest,
            input.client.client_discount_available,
            base,
        );
        let request = if eligible {
            input.pricing_request(foreign, calculator.decimal_places())
        } else {
            None
        };

        match request {
            Some(request) => {
                slot.loading = true;
                self.debouncer.push(Ticket { sequence, request });
            }
            None => {
                slot.server = None;
                slot.loading = false;
                self.debouncer.cancel();
            }
        }
        slot.input = Some(input);

        self.inner.publish(&slot)
    }

    pub fn current(&self) -> DiscountResult {
        self.inner.results.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DiscountResult> {
        self.inner.results.subscribe()
    }

    /// Waits until no reconciliation is pending for the latest input.
    pub async fn settled(&self) -> DiscountResult {
        let mut receiver = self.inner.results.subscribe();
        loop {
            let result = receiver.borrow_and_update().clone();
            if !result.is_loading {
                return result;
            }
            if receiver.changed().await.is_err() {
                return result;
            }
        }
    }
}

impl<P: PricingProvider> Inner<P> {
    #[instrument(
        name = "discount.reconcile",
        skip_all,
        fields(sequence = ticket.sequence, amount = %ticket.request.amount, error, error.message)
    )]
    async fn reconcile(&self, ticket: Ticket) {
        let outcome = match self.provider.request_pricing(&ticket.request).await {
            Ok(response) => Reconciliation::Priced(ServerPricing::from_response(
                response,
                self.calculator.decimal_places(),
            )),
            Err(e) => {
                insert_error_fields(&e);
                Reconciliation::Fallback
            }
        };

        let mut slot = self.slot.write().await;
        if slot.sequence != ticket.sequence {
            tracing::debug!(latest = slot.sequence, "discarding stale pricing response");
            return;
        }

        slot.loading = false;
        slot.server = match outcome {
            Reconciliation::Priced(pricing) => Some(pricing),
            Reconciliation::Fallback => {
                tracing::warn!("pricing unavailable, using local discount");
                None
            }
        };
        self.publish(&slot);
    }

    fn publish(&self, slot: &PricingSlot) -> DiscountResult {
        let result = self.evaluate(slot);
        self.results.send_replace(result.clone());
        result
    }

    fn evaluate(&self, slot: &PricingSlot) -> DiscountResult {
        let input = match slot.input.as_ref() {
            Some(input) => input,
            None => return DiscountResult::default(),
        };

        let (foreign_amount, base_amount) = input.amounts();
        let client = input.client;
        let eligible = self.calculator.can_show_discount(
            client.is_guest,
            client.client_discount_available,
            base_amount,
        );
        let server = slot.server.as_ref().filter(|_| eligible);
        let final_percent = self.calculator.final_percent(server, eligible);
        let final_amount =
            self.calculator
                .resolve_final_amount(server, base_amount, final_percent, eligible);
        let message = (!client.is_guest).then(|| {
            self.composer
                .compose(input.mode, eligible, client.client_discount_available)
        });

        DiscountResult {
            foreign_amount,
            base_amount,
            eligible,
            final_percent,
            final_amount,
            message,
            is_loading: slot.loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{currency::*, traits::DummyProvider};
    use pricing_client::{BranchId, ExchangeRateId};
    use rust_decimal_macros::dec;

    fn booking(amount: rust_decimal::Decimal) -> BookingInput {
        BookingInput {
            amount: AmountInput::Foreign(ForeignAmount::from(amount)),
            mode: TransactionMode::Buy,
            rate: ExchangeRatePair::new(dec!(495), dec!(500)),
            branch_id: Some(BranchId::from(1)),
            exchange_rate_id: Some(ExchangeRateId::from(1)),
            is_rate_locked: false,
            client: ClientContext::default(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn eligible_input_is_reconciled() {
        let session = DiscountSession::new(
            DiscountConfig::default(),
            DummyProvider::new(dec!(500), dec!(4)),
        );

        let immediate = session.update(booking(dec!(2000))).await;
        assert!(immediate.eligible);
        assert!(immediate.is_loading);
        assert_eq!(immediate.final_percent, dec!(5));
        assert_eq!(immediate.final_amount, Some(BaseAmount::from(dec!(950000))));

        let settled = session.settled().await;
        assert!(!settled.is_loading);
        assert_eq!(settled.final_percent, dec!(4));
        assert_eq!(settled.final_amount, Some(BaseAmount::from(dec!(960000))));
        assert_eq!(session.current(), settled);
    }

    #[tokio::test(start_paused = true)]
    async fn ineligible_input_clears_server_result() {
        let session = DiscountSession::new(
            DiscountConfig::default(),
            DummyProvider::new(dec!(500), dec!(4)),
        );
        session.update(booking(dec!(2000))).await;
        session.settled().await;

        let result = session.update(booking(dec!(10))).await;
        assert!(!result.eligible);
        assert!(!result.is_loading);
        assert_eq!(result.final_amount, None);
        assert_eq!(result.final_percent, dec!(0));
        assert_eq!(
            result.message.as_deref(),
            Some("Скидка доступна только при сумме больше 500 000 ₸")
        );
    }
}
