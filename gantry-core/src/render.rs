use std::fmt::{self, Write};

use crate::system::System;

/// Writes one `name: value` line per field, values to 3 decimal places.
///
/// # Errors
///
/// Propagates errors from the underlying writer.
pub fn write_system<S: System>(out: &mut impl Write, system: &S) -> fmt::Result {
    for (i, (name, value)) in S::FIELDS.iter().zip(system.values()).enumerate() {
        if i > 0 {
            out.write_char('\n')?;
        }
        write!(out, "{name}: {value:.3}")?;
    }
    Ok(())
}

/// Renders a system as text, one field per line.
pub fn render<S: System>(system: &S) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = write_system(&mut out, system);
    out
}
