use shub_derive::shub_error;
use std::borrow::Cow;

#[shub_error]
pub enum PlanFileError {
    #[error("Plan file I/O error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown plan{}: {plan}", format_context(.context))]
    UnknownPlan { plan: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let _ = PlanFileError::from("boom");
    let _ = PlanFileError::UnknownPlan { plan: "gold".to_owned(), context: None };
}
