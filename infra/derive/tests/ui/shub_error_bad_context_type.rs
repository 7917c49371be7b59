use shub_derive::shub_error;

#[shub_error]
pub enum PlanError {
    #[error("Unknown plan: {plan}")]
    UnknownPlan { plan: String, context: Option<String> },
}

fn main() {}
