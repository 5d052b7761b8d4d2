use anyhow::Result;
use std::io;

use pension_calculator::{EditorReader, Shell, SystemClock};

fn main() -> Result<()> {
    env_logger::init();
    log::debug!("pension-calculator {}", pension_calculator::VERSION);

    // Line editor lives for the whole session and is released on exit
    let reader = EditorReader::new()?;
    run_session(reader)?;

    Ok(())
}

#[cfg(feature = "tui")]
fn run_session(reader: EditorReader) -> Result<()> {
    let selector = pension_calculator::ArrowSelector::new();
    Shell::new(reader, selector, SystemClock, io::stdout()).run()
}

#[cfg(not(feature = "tui"))]
fn run_session(reader: EditorReader) -> Result<()> {
    use std::cell::RefCell;
    use std::rc::Rc;

    // The numbered menu reads through the same editor as the prompts
    let reader = Rc::new(RefCell::new(reader));
    let selector = pension_calculator::LineSelector::new(Rc::clone(&reader), io::stdout());
    Shell::new(reader, selector, SystemClock, io::stdout()).run()
}
