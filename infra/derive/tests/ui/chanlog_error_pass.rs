use chanlog_derive::chanlog_error;
use std::borrow::Cow;

#[chanlog_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Rejected value{}: {value}", format_context(.context))]
    Rejected { value: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn open() -> Result<(), DemoError> {
    Err::<(), _>(std::io::Error::other("disk gone")).context("opening demo")?;
    Ok(())
}

fn main() {
    let _ = open();
}
