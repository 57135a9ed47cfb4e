//! Order session aggregate: drives one customer's order from the first pizza
//! to payment confirmation.

use std::sync::Arc;

use common::SessionId;
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregate, DomainEvent};
use crate::catalog::Catalog;
use crate::pricing::{self, DELIVERY_FEE};

use super::{
    FlavorId, Money, OrderError, OrderSummary, PaymentInstructions, PaymentMethod, PizzaBuilder,
    PizzaConfig, PizzaSummary, Prompt, SessionEvent, SessionState, SizeId,
};

/// Shown when a delivery order is confirmed.
pub const DELIVERY_MESSAGE: &str =
    "Thank you for your order! Your delivery will arrive in approximately 50 minutes.";

/// Shown when a pickup order is confirmed.
pub const PICKUP_MESSAGE: &str =
    "Thank you for your order! Your pizza will be ready for pickup in up to 35 minutes.";

const PAYMENT_DECLINED_MESSAGE: &str = "Payment not confirmed. Please choose a payment method.";

/// The pizzas and delivery choice of the order being placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pizzas: Vec<PizzaConfig>,
    has_delivery: bool,
    subtotal: Money,
    total: Money,
}

impl Order {
    pub fn pizzas(&self) -> &[PizzaConfig] {
        &self.pizzas
    }

    pub fn pizza_count(&self) -> usize {
        self.pizzas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pizzas.is_empty()
    }

    pub fn has_delivery(&self) -> bool {
        self.has_delivery
    }

    /// Sum of pizza prices.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Subtotal plus delivery fee, before any payment discount.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn summary(&self) -> OrderSummary {
        OrderSummary::new(&self.pizzas, self.has_delivery)
    }

    fn add_pizza(&mut self, pizza: PizzaConfig) {
        self.subtotal += pizza.price;
        self.pizzas.push(pizza);
        self.total = pricing::order_total(self.subtotal, self.has_delivery);
    }

    fn set_delivery(&mut self, has_delivery: bool) {
        self.has_delivery = has_delivery;
        self.total = pricing::order_total(self.subtotal, self.has_delivery);
    }
}

/// Result of a session command: the state reached and anything the customer
/// should be told.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub state: SessionState,
    pub message: Option<String>,
}

/// One customer's order, from the first pizza through payment.
///
/// Session-level decisions are recorded as [`SessionEvent`]s and folded into
/// the state by [`Aggregate::apply`]; the journal holds the events applied
/// since the last reset, so it only ever covers the current order. The pizza currently being configured
/// lives in a [`PizzaBuilder`] and becomes part of the order only when it is
/// completed.
#[derive(Debug, Clone)]
pub struct OrderSession {
    id: SessionId,
    catalog: Arc<Catalog>,
    state: SessionState,
    order: Order,
    builder: Option<PizzaBuilder>,
    payment: Option<PaymentInstructions>,
    history: Vec<SessionEvent>,
}

impl Aggregate for OrderSession {
    type Event = SessionEvent;
    type Error = OrderError;

    fn aggregate_type() -> &'static str {
        "OrderSession"
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            SessionEvent::PizzaStarted(_) => {
                self.builder = Some(PizzaBuilder::new(Arc::clone(&self.catalog)));
                self.state = SessionState::BuildingPizza;
            }
            SessionEvent::PizzaAdded(data) => {
                self.builder = None;
                self.order.add_pizza(data.pizza);
                self.state = SessionState::AskMoreOrDeliver;
            }
            SessionEvent::MorePizzasAnswered(data) => {
                if !data.wants_more {
                    self.state = SessionState::ChoosingDelivery;
                }
                // Otherwise PizzaStarted follows
            }
            SessionEvent::DeliveryChosen(data) => {
                self.order.set_delivery(data.wants_delivery);
                self.state = SessionState::ChoosingPayment;
            }
            SessionEvent::PaymentSelected(data) => {
                self.payment = Some(data.instructions);
                self.state = SessionState::AwaitingPaymentConfirmation;
            }
            SessionEvent::PaymentAnswered(data) => {
                if !data.confirmed {
                    self.payment = None;
                    self.state = SessionState::ChoosingPayment;
                }
                // Otherwise OrderFinalized follows
            }
            SessionEvent::OrderFinalized(_) => {
                self.state = SessionState::Finalized;
            }
            SessionEvent::SessionReset(_) => {
                self.order = Order::default();
                self.builder = None;
                self.payment = None;
                self.state = SessionState::Idle;
            }
        }
    }
}

// Query methods
impl OrderSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            id: SessionId::new(),
            catalog,
            state: SessionState::Idle,
            order: Order::default(),
            builder: None,
            payment: None,
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    /// The pizza being configured, while in `BuildingPizza`.
    pub fn builder(&self) -> Option<&PizzaBuilder> {
        self.builder.as_ref()
    }

    /// Instructions for the payment awaiting confirmation.
    pub fn payment(&self) -> Option<&PaymentInstructions> {
        self.payment.as_ref()
    }

    /// Every event applied to this session, oldest first.
    pub fn history(&self) -> &[SessionEvent] {
        &self.history
    }

    pub fn pizza_summary(&self) -> Option<PizzaSummary> {
        self.builder.as_ref().and_then(PizzaBuilder::summary)
    }

    pub fn order_summary(&self) -> OrderSummary {
        self.order.summary()
    }

    /// Completion text for the finalized order, depending on delivery.
    pub fn completion_message(&self) -> Option<&'static str> {
        self.state
            .is_terminal()
            .then(|| completion_message(self.order.has_delivery()))
    }

    /// What the presentation layer should ask next.
    pub fn prompt(&self) -> Prompt {
        match self.state {
            SessionState::Idle => Prompt::StartOrder,
            SessionState::BuildingPizza => self
                .builder
                .as_ref()
                .and_then(PizzaBuilder::prompt)
                .unwrap_or(Prompt::ChooseAddOns),
            SessionState::AskMoreOrDeliver => Prompt::AddAnotherPizza,
            SessionState::ChoosingDelivery => Prompt::ChooseDelivery { fee: DELIVERY_FEE },
            SessionState::ChoosingPayment => Prompt::ChoosePayment {
                total: self.order.total(),
            },
            SessionState::AwaitingPaymentConfirmation => match &self.payment {
                Some(payment) => Prompt::ConfirmPayment {
                    method: payment.method,
                },
                None => Prompt::ChoosePayment {
                    total: self.order.total(),
                },
            },
            SessionState::Finalized => Prompt::Done {
                message: completion_message(self.order.has_delivery()).to_string(),
            },
        }
    }
}

// Command methods
impl OrderSession {
    /// Opens a builder for the first pizza of a new order.
    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    pub fn start_new_pizza(&mut self) -> Result<Transition, OrderError> {
        let events = self.decide_start_pizza()?;
        Ok(self.execute(events, None))
    }

    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    pub fn choose_size(&mut self, size_id: SizeId) -> Result<Transition, OrderError> {
        self.active_builder("choose size")?.choose_size(size_id)?;
        Ok(self.transition(None))
    }

    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    pub fn choose_flavor(&mut self, flavor_id: FlavorId) -> Result<Transition, OrderError> {
        self.active_builder("choose flavor")?.choose_flavor(flavor_id)?;
        Ok(self.transition(None))
    }

    /// Adds a soda to the pizza being built. `LimitReached` past two.
    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    pub fn add_soda(&mut self) -> Result<Transition, OrderError> {
        self.active_builder("add soda")?
            .add_soda()
            .inspect_err(log_notice)?;
        Ok(self.transition(None))
    }

    /// Adds the stuffed crust to the pizza being built. `LimitReached` if it
    /// already has one.
    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    pub fn add_stuffed_crust(&mut self) -> Result<Transition, OrderError> {
        self.active_builder("add stuffed crust")?
            .add_stuffed_crust()
            .inspect_err(log_notice)?;
        Ok(self.transition(None))
    }

    /// Finishes the pizza being built and appends it to the order.
    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    pub fn complete_pizza(&mut self) -> Result<Transition, OrderError> {
        let pizza = self.active_builder("complete pizza")?.complete()?;

        metrics::counter!("pizzas_completed_total").increment(1);
        tracing::info!(size = %pizza.size.name, price = %pizza.price, "pizza completed");

        Ok(self.execute(vec![SessionEvent::pizza_added(pizza)], None))
    }

    /// Answers "add another pizza?": `true` opens a new builder, `false`
    /// moves on to delivery.
    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    pub fn continue_or_deliver(&mut self, wants_more: bool) -> Result<Transition, OrderError> {
        if !self.state.can_continue_or_deliver() {
            return Err(OrderError::session_transition(
                self.state,
                "continue or deliver",
            ));
        }

        let mut events = vec![SessionEvent::more_pizzas_answered(wants_more)];
        if wants_more {
            events.push(SessionEvent::pizza_started());
        }
        Ok(self.execute(events, None))
    }

    /// Answers "deliver for R$10.00?".
    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    pub fn set_delivery(&mut self, wants_delivery: bool) -> Result<Transition, OrderError> {
        if !self.state.can_set_delivery() {
            return Err(OrderError::session_transition(self.state, "set delivery"));
        }

        let fee = if wants_delivery {
            DELIVERY_FEE
        } else {
            Money::zero()
        };
        Ok(self.execute(vec![SessionEvent::delivery_chosen(wants_delivery, fee)], None))
    }

    /// Picks the payment method. The message tells the customer what to pay
    /// and where; [`OrderSession::payment`] holds the same details. PIX gets
    /// the discount.
    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    pub fn select_payment(&mut self, method: PaymentMethod) -> Result<Transition, OrderError> {
        if !self.state.can_select_payment() {
            return Err(OrderError::session_transition(self.state, "select payment"));
        }

        let instructions = PaymentInstructions::for_total(method, self.order.total());
        let message = instructions.to_string();
        Ok(self.execute(
            vec![SessionEvent::payment_selected(instructions)],
            Some(message),
        ))
    }

    /// Answers "did you pay?". Confirming finalizes the order; declining goes
    /// back to payment selection, as many times as needed.
    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    pub fn confirm_payment(&mut self, confirmed: bool) -> Result<Transition, OrderError> {
        let events = self.decide_payment_answer(confirmed)?;

        if !confirmed {
            metrics::counter!("payment_declined_total").increment(1);
            tracing::debug!("payment not confirmed, back to payment selection");
            return Ok(self.execute(events, Some(PAYMENT_DECLINED_MESSAGE.to_string())));
        }

        let message = completion_message(self.order.has_delivery());
        let transition = self.execute(events, Some(message.to_string()));
        if let Some(SessionEvent::OrderFinalized(data)) = self.history.last() {
            metrics::counter!("orders_finalized_total", "payment" => data.method.as_str())
                .increment(1);
            metrics::histogram!("order_total_cents").record(data.amount_paid.cents() as f64);
            tracing::info!(
                method = %data.method,
                amount_paid = %data.amount_paid,
                has_delivery = data.has_delivery,
                pizzas = data.pizza_count,
                "order finalized"
            );
        }
        Ok(transition)
    }

    /// Clears the finalized order so the next one can start. The journal of
    /// the finished order is dropped and restarts with the reset itself.
    #[tracing::instrument(skip(self), fields(session_id = %self.id))]
    pub fn reset(&mut self) -> Result<Transition, OrderError> {
        if !self.state.can_reset() {
            return Err(OrderError::session_transition(self.state, "reset"));
        }

        self.history.clear();
        Ok(self.execute(vec![SessionEvent::session_reset()], None))
    }
}

// Decisions and helpers
impl OrderSession {
    fn decide_start_pizza(&self) -> Result<Vec<SessionEvent>, OrderError> {
        if !self.state.can_start_pizza() {
            return Err(OrderError::session_transition(
                self.state,
                "start new pizza",
            ));
        }

        Ok(vec![SessionEvent::pizza_started()])
    }

    fn decide_payment_answer(&self, confirmed: bool) -> Result<Vec<SessionEvent>, OrderError> {
        let payment = match (&self.payment, self.state.can_confirm_payment()) {
            (Some(payment), true) => payment,
            _ => {
                return Err(OrderError::session_transition(
                    self.state,
                    "confirm payment",
                ));
            }
        };

        let mut events = vec![SessionEvent::payment_answered(payment.method, confirmed)];
        if confirmed {
            events.push(SessionEvent::order_finalized(
                payment,
                self.order.has_delivery(),
                self.order.pizza_count(),
            ));
        }
        Ok(events)
    }

    fn active_builder(&mut self, action: &'static str) -> Result<&mut PizzaBuilder, OrderError> {
        let state = self.state;
        match self.builder.as_mut() {
            Some(builder) if state.can_build() => Ok(builder),
            _ => Err(OrderError::session_transition(state, action)),
        }
    }

    fn execute(&mut self, events: Vec<SessionEvent>, message: Option<String>) -> Transition {
        for event in events {
            tracing::debug!(event_type = event.event_type(), "applying event");
            self.apply(event.clone());
            self.history.push(event);
        }
        self.transition(message)
    }

    fn transition(&self, message: Option<String>) -> Transition {
        Transition {
            state: self.state,
            message,
        }
    }
}

impl Default for OrderSession {
    fn default() -> Self {
        Self::new(Arc::new(Catalog::standard()))
    }
}

fn completion_message(has_delivery: bool) -> &'static str {
    if has_delivery {
        DELIVERY_MESSAGE
    } else {
        PICKUP_MESSAGE
    }
}

fn log_notice(err: &OrderError) {
    if err.is_notice() {
        tracing::debug!(%err, "add-on limit reached");
    }
}
