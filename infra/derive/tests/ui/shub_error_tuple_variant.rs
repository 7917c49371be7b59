use shub_derive::shub_error;

#[shub_error]
pub enum GateError {
    Refused(String),
}

fn main() {}
