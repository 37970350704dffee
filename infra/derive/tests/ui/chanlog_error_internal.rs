use chanlog_derive::chanlog_error;
use std::borrow::Cow;

#[chanlog_error]
pub enum DemoError {
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn fail() -> Result<(), DemoError> {
    Err("static message".into())
}

fn main() {
    let _ = fail();
    let _ = DemoError::from(String::from("owned message"));
}
