use shub_derive::shub_error;
use std::borrow::Cow;

#[shub_error]
pub enum LedgerError {
    #[error("Ledger I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Missing entry{}: {id}", format_context(.context))]
    Missing { id: String, context: Option<Cow<'static, str>> },

    #[error("Internal ledger error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_entry() -> Result<String, std::io::Error> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))
}

fn lookup(id: &str) -> Result<String, LedgerError> {
    Err(LedgerError::Missing { id: id.to_owned(), context: None })
}

#[test]
fn source_errors_convert_with_question_mark() {
    fn run() -> Result<String, LedgerError> {
        Ok(read_entry()?)
    }

    let err = run().unwrap_err();
    assert!(matches!(err, LedgerError::Io { context: None, .. }));
    assert_eq!(err.to_string(), "Ledger I/O error: gone");
}

#[test]
fn context_is_attached_to_source_results() {
    let err = read_entry().context("loading ledger").unwrap_err();
    assert_eq!(err.to_string(), "Ledger I/O error (loading ledger): gone");
}

#[test]
fn context_is_attached_to_own_results() {
    let err = lookup("sub-1").context("renewal").unwrap_err();
    assert_eq!(err.to_string(), "Missing entry (renewal): sub-1");
}

#[test]
fn strings_fall_back_to_internal() {
    let borrowed = LedgerError::from("static failure");
    assert!(matches!(borrowed, LedgerError::Internal { .. }));

    let owned: LedgerError = format!("failure #{}", 2).into();
    assert_eq!(owned.to_string(), "Internal ledger error: failure #2");
}
