//! Message arguments accepted by the non-formatted emit methods
//!
//! Arguments are concatenated without separators. A call with no arguments
//! at all (`()` or an empty slice) writes nothing.

use std::fmt::{self, Display, Write};

pub trait Message {
    /// True when the call carried no arguments.
    fn is_absent(&self) -> bool {
        false
    }

    fn write_message(&self, out: &mut String);
}

impl Message for () {
    fn is_absent(&self) -> bool {
        true
    }

    fn write_message(&self, _out: &mut String) {}
}

impl Message for &str {
    fn write_message(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Message for String {
    fn write_message(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Message for &String {
    fn write_message(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl Message for fmt::Arguments<'_> {
    fn write_message(&self, out: &mut String) {
        let _ = out.write_fmt(*self);
    }
}

impl Message for &[&dyn Display] {
    fn is_absent(&self) -> bool {
        self.is_empty()
    }

    fn write_message(&self, out: &mut String) {
        for arg in self.iter() {
            let _ = write!(out, "{}", arg);
        }
    }
}

impl<const N: usize> Message for [&dyn Display; N] {
    fn is_absent(&self) -> bool {
        N == 0
    }

    fn write_message(&self, out: &mut String) {
        self.as_slice().write_message(out);
    }
}

macro_rules! tuple_message {
    ($($name:ident $arg:ident)+) => {
        impl<$($name: Display),+> Message for ($($name,)+) {
            fn write_message(&self, out: &mut String) {
                let ($($arg,)+) = self;
                $(let _ = write!(out, "{}", $arg);)+
            }
        }
    };
}

tuple_message!(A a);
tuple_message!(A a B b);
tuple_message!(A a B b C c);
tuple_message!(A a B b C c D d);
tuple_message!(A a B b C c D d E e);
tuple_message!(A a B b C c D d E e F f);
