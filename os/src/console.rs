use core::fmt::{self, Write};
use lazy_static::*;
use spin::Mutex;

/// 平台提供的输出函数：板子上是 SBI 控制台，宿主机测试里是 stdout
pub type ConsoleSink = fn(&str);

lazy_static! {
    static ref CONSOLE_SINK: Mutex<Option<ConsoleSink>> = Mutex::new(None);
}

struct Stdout;

impl Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // 先取出函数指针再调用，输出期间不持有锁
        let sink = *CONSOLE_SINK.lock();
        if let Some(sink) = sink {
            sink(s);
        }
        Ok(())
    }
}

/// Route console output to `sink`. Output written before a sink is set is dropped.
pub fn set_sink(sink: ConsoleSink) {
    *CONSOLE_SINK.lock() = Some(sink);
}

pub fn print(args: fmt::Arguments) {
    let _ = Stdout.write_fmt(args);
}

#[macro_export]
macro_rules! print {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::print(format_args!($fmt $(, $($arg)+)?));
    }
}

#[macro_export]
macro_rules! println {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::print(format_args!(concat!($fmt, "\n") $(, $($arg)+)?));
    }
}
