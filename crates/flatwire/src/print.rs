//! Debug printer: renders values as nested, bracketed text.
//!
//! Every token is followed by a single space:
//!
//! ```text
//! { MrCool #0 17 { Single foo 12 [ 1 2 3 ] } [ #1 2 #2 7 ] }
//! ```
//!
//! Composites print as `{ ... }`, sequences as `[ ... ]`, and unions as
//! `#<discriminant>` followed by the payload. Output goes to any
//! [`fmt::Write`] sink chosen by the caller.

use std::fmt;

use crate::dispatch::{Classify, Composite, TaggedUnion, Visitor, Wire};

/// A type that can be rendered by a [`Printer`].
pub trait DebugPrint: Classify {
    /// Writes this value's trace.
    fn print<W: fmt::Write>(&self, printer: &mut Printer<W>) -> fmt::Result;
}

/// Printing state: the text sink.
#[derive(Debug)]
pub struct Printer<W> {
    out: W,
}

impl<W: fmt::Write> Printer<W> {
    /// Creates a printer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Prints `value` and returns the printer for chaining.
    pub fn print<T: DebugPrint + ?Sized>(&mut self, value: &T) -> Result<&mut Self, fmt::Error> {
        value.print(self)?;
        Ok(self)
    }

    /// Writes one token and its separator.
    fn token(&mut self, token: impl fmt::Display) -> fmt::Result {
        write!(self.out, "{token} ")
    }
}

impl<W: fmt::Write> Visitor for Printer<W> {
    type Error = fmt::Error;

    fn field<T: Wire>(&mut self, value: &T) -> fmt::Result {
        value.print(self)
    }
}

/// Display adapter that renders a value's trace.
///
/// ```
/// use flatwire::print::Trace;
///
/// assert_eq!(Trace(&vec![1u8, 2]).to_string(), "[ 1 2 ] ");
/// ```
pub struct Trace<'a, T: ?Sized>(pub &'a T);

impl<T: DebugPrint + ?Sized> fmt::Display for Trace<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.print(&mut Printer::new(f))
    }
}

/// Renders a value's trace into a new string.
pub fn to_trace_string<T: DebugPrint + ?Sized>(value: &T) -> String {
    Trace(value).to_string()
}

// =============================================================================
// CATEGORY RULES
// =============================================================================

/// Text: the characters verbatim.
pub fn print_text<W: fmt::Write>(printer: &mut Printer<W>, text: &str) -> fmt::Result {
    printer.token(text)
}

/// Sequence: `[`, each element, `]`.
pub fn print_sequence<W: fmt::Write, T: DebugPrint>(printer: &mut Printer<W>, items: &[T]) -> fmt::Result {
    printer.token('[')?;
    for item in items {
        item.print(printer)?;
    }
    printer.token(']')
}

/// Tagged union: `#<discriminant>`, then the payload.
pub fn print_union<W: fmt::Write, U: TaggedUnion>(printer: &mut Printer<W>, value: &U) -> fmt::Result {
    printer.token(format_args!("#{}", value.discriminant()))?;
    value.visit_payload(printer)
}

/// Composite: `{`, each field in hook order, `}`.
pub fn print_composite<W: fmt::Write, C: Composite>(printer: &mut Printer<W>, value: &C) -> fmt::Result {
    printer.token('{')?;
    value.visit(printer)?;
    printer.token('}')
}

// =============================================================================
// BUILT-IN TYPES
// =============================================================================

macro_rules! print_scalar {
    // Narrower than two bytes: widened so they print as numbers.
    (narrow: $($ty:ty),* $(,)?) => {
        $(
            impl DebugPrint for $ty {
                fn print<W: fmt::Write>(&self, printer: &mut Printer<W>) -> fmt::Result {
                    printer.token(i32::from(*self))
                }
            }
        )*
    };
    (wide: $($ty:ty),* $(,)?) => {
        $(
            impl DebugPrint for $ty {
                fn print<W: fmt::Write>(&self, printer: &mut Printer<W>) -> fmt::Result {
                    printer.token(self)
                }
            }
        )*
    };
}

print_scalar!(narrow: u8, i8, bool);
print_scalar!(wide: u16, u32, u64, u128, usize, i16, i32, i64, i128, isize, f32, f64);

impl DebugPrint for str {
    fn print<W: fmt::Write>(&self, printer: &mut Printer<W>) -> fmt::Result {
        print_text(printer, self)
    }
}

impl DebugPrint for String {
    fn print<W: fmt::Write>(&self, printer: &mut Printer<W>) -> fmt::Result {
        print_text(printer, self)
    }
}

impl<T: DebugPrint> DebugPrint for [T] {
    fn print<W: fmt::Write>(&self, printer: &mut Printer<W>) -> fmt::Result {
        print_sequence(printer, self)
    }
}

impl<T: DebugPrint> DebugPrint for Vec<T> {
    fn print<W: fmt::Write>(&self, printer: &mut Printer<W>) -> fmt::Result {
        print_sequence(printer, self)
    }
}

impl<T: Wire> DebugPrint for Option<T> {
    fn print<W: fmt::Write>(&self, printer: &mut Printer<W>) -> fmt::Result {
        print_union(printer, self)
    }
}

impl DebugPrint for () {
    fn print<W: fmt::Write>(&self, printer: &mut Printer<W>) -> fmt::Result {
        print_composite(printer, self)
    }
}

impl<T: DebugPrint + ?Sized> DebugPrint for Box<T> {
    fn print<W: fmt::Write>(&self, printer: &mut Printer<W>) -> fmt::Result {
        (**self).print(printer)
    }
}
