//! Built-in enum tree and type registrations
//!
//! Custom configuration is merged on top of these: a custom category or
//! registration key replaces the default of the same name.

use crate::core_types::enum_tree::{EnumNode, Status};
use crate::core_types::errors::ErrorClass;
use crate::registry::Registration;

/// Type given to malformed input and unregistered categories.
pub const FALLBACK_TYPE: &str = "DEFAULT:FALLBACK:ERROR";

/// Type used when a non-respondable error is serialized as a response.
pub const RESPONSE_DEFAULT_TYPE: &str = "RESPONSE:DEFAULT:ERROR";

/// Status used when a serialized error carries none.
pub const RESPONSE_FALLBACK_STATUS: u16 = 500;

fn detail(name: &str, description: &str, status: Status) -> EnumNode {
    EnumNode::new(name, description, status)
}

fn inherit(name: &str, description: &str) -> EnumNode {
    detail(name, description, Status::Inherit)
}

fn code(name: &str, description: &str, status: u16) -> EnumNode {
    detail(name, description, Status::Code(status))
}

/// The default enum tree.
pub fn default_enum() -> Vec<EnumNode> {
    vec![
        code("DEFAULT", "Default Misstep extended error", 500).child(
            inherit("FALLBACK", "Fallback error").child(inherit(
                "ERROR",
                "This error could not be categorized. See payload for more information",
            )),
        ),
        code("EXTENDABLE", "Extendable error", 500).child(
            inherit("DEFAULT", "Default extendable error")
                .child(inherit("ERROR", "Uncategorized extendable error")),
        ),
        code("MISSTEP", "Misstep error", 500)
            .child(
                inherit("DEFAULT", "Default Misstep error")
                    .child(inherit("ERROR", "Uncategorized Misstep error")),
            )
            .child(inherit("OPTIONS", "Misstep options error").child(inherit(
                "VALIDATION",
                "Options did not pass validation. See payload for more information",
            ))),
        code("RESPONSE", "Response error", 500)
            .child(inherit("DEFAULT", "Default response error").child(inherit(
                "ERROR",
                "This error is a fatal error that has not been categorized. See payload for more information",
            )))
            .child(code("CLIENT", "Client response error", 400).with_children(vec![
                inherit("BAD_REQUEST", "The request could not be understood"),
                code("UNAUTHORIZED", "Authentication is required", 401),
                code("FORBIDDEN", "Access to this resource is forbidden", 403),
                code("NOT_FOUND", "The requested resource could not be found", 404),
                code("CONFLICT", "The request conflicts with the current state", 409),
                code("UNPROCESSABLE", "The request could not be processed", 422),
                code("TOO_MANY_REQUESTS", "Too many requests, try again later", 429),
            ]))
            .child(inherit("SERVER", "Server response error").with_children(vec![
                inherit("INTERNAL", "An internal server error occurred"),
                code("NOT_IMPLEMENTED", "This feature is not implemented", 501),
                code("BAD_GATEWAY", "An upstream service returned an invalid response", 502),
                code("UNAVAILABLE", "The service is temporarily unavailable", 503),
                code("TIMEOUT", "An upstream service timed out", 504),
            ])),
    ]
}

/// The default type registrations.
pub fn default_types() -> Vec<Registration> {
    vec![
        Registration::class("EXTENDABLE", ErrorClass::EXTENDABLE),
        Registration::class("MISSTEP", ErrorClass::MISSTEP),
        Registration::class("RESPONSE", ErrorClass::RESPONSE),
    ]
}
