use core::fmt::{self, Write};

/// Where the radio layer reports what it is doing.
pub trait Log {
    fn log_str(&mut self, s: &str);
    fn log_num(&mut self, n: u32);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLog;

impl Log for NoLog {
    fn log_str(&mut self, _: &str) {}
    fn log_num(&mut self, _: u32) {}
}

/// Logs to any `fmt::Write` console, e.g. semihosting stdout or a USB serial port.
///
/// Write errors are dropped: losing a log line must not fail a radio operation.
pub struct WriteLog<W: Write>(pub W);

impl<W: Write> Log for WriteLog<W> {
    fn log_str(&mut self, s: &str) {
        let _ = self.0.write_str(s);
    }

    fn log_num(&mut self, n: u32) {
        let _ = write!(self.0, "{}", n);
    }
}

impl<W: Write> fmt::Debug for WriteLog<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WriteLog")
    }
}

impl<L: Log + ?Sized> Log for &mut L {
    fn log_str(&mut self, s: &str) {
        (**self).log_str(s)
    }

    fn log_num(&mut self, n: u32) {
        (**self).log_num(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::String;

    #[test]
    fn write_log_formats_numbers() {
        let mut log = WriteLog(String::<32>::new());
        log.log_str("pipe ");
        log.log_num(3);
        log.log_str(" = ");
        log.log_num(133);
        assert_eq!(&*log.0, "pipe 3 = 133");
    }

    #[test]
    fn write_log_ignores_full_console() {
        let mut log = WriteLog(String::<4>::new());
        log.log_str("overflowing");
        log.log_num(12345);
        assert!(log.0.len() <= 4);
    }
}
