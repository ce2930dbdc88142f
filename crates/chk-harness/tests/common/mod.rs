use std::cell::RefCell;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use chk_core::{ChkError, ManualClock, ReportConfiguration};
use chk_harness::{Harness, HarnessBuilder};

/// Cloneable in-memory stdout.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn config(args: &[&str], dir: &Path) -> ReportConfiguration {
    let mut config = ReportConfiguration::resolve(args.iter().copied(), "smoke", |_| None);
    if let Some(output) = config.output.take() {
        config.output = Some(dir.join(output));
    }
    config
}

pub fn harness(
    config: ReportConfiguration,
) -> Result<(Harness, ManualClock, SharedBuffer), ChkError> {
    let clock = ManualClock::new(1_700_000_000_000);
    let out = SharedBuffer::default();
    let harness = HarnessBuilder::new(config)
        .clock(clock.clone())
        .stdout(out.clone())
        .initialize()?;
    Ok((harness, clock, out))
}
