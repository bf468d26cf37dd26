//! Shared helpers for misstep integration tests

#![allow(dead_code)]

use misstep::{
    BuilderOptions, CatcherOptions, EnumNode, ErrorClass, Misstep, MisstepOptions, Registration,
    ResponseBody, ResponseSink, Status,
};
use std::sync::Arc;

/// Application-style enum: a PAYMENT category next to the defaults.
///
/// `PAYMENT:CARD:DECLINED` resolves to 402, `PAYMENT:CARD:EXPIRED` to 410.
pub fn payment_enum() -> Vec<EnumNode> {
    vec![EnumNode::new("PAYMENT", "Payment error", Status::Code(402))
        .child(
            EnumNode::new("CARD", "Card payment error", Status::Inherit).with_children(vec![
                EnumNode::new("DECLINED", "The card was declined", Status::Inherit),
                EnumNode::new("EXPIRED", "The card has expired", Status::Code(410)),
            ]),
        )
        .child(
            EnumNode::new("DEFAULT", "Default payment error", Status::Inherit)
                .child(EnumNode::new("ERROR", "Uncategorized payment error", Status::Inherit)),
        )]
}

/// Facade configured with the payment enum and a respondable PaymentError.
pub fn create_payment_misstep() -> Misstep {
    let builder = BuilderOptions::default()
        .with_enum(payment_enum())
        .with_types(vec![Registration::class(
            "PAYMENT",
            ErrorClass::respondable("PaymentError", "PAYMENT:DEFAULT:ERROR", 402),
        )]);
    Misstep::new(MisstepOptions::default().with_builder(builder))
        .expect("payment options should be valid")
}

/// Facade with custom catcher options and default builder options.
pub fn create_misstep_with_catchers(catchers: CatcherOptions) -> Misstep {
    Misstep::new(MisstepOptions::default().with_catcher(catchers))
        .expect("catcher options should be valid")
}

/// Minimal HTTP response double.
#[derive(Debug, Default)]
pub struct MockResponse {
    pub status: Option<u16>,
    pub body: Option<ResponseBody>,
    pub writes: usize,
}

impl ResponseSink for MockResponse {
    fn status(&mut self, code: u16) -> &mut dyn ResponseSink {
        self.status = Some(code);
        self
    }

    fn json(&mut self, body: &ResponseBody) {
        self.body = Some(body.clone());
        self.writes += 1;
    }
}

/// Shared handle type for tests that count calls across closures.
pub type Counter = Arc<std::sync::atomic::AtomicUsize>;
