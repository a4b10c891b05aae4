//! Debug directives carried in comments
//!
//! A comment whose body starts with the word `debug` is a diagnostic
//! directive: `(debug stack note)` writes the whole stack to the debug sink,
//! `(debug var name note)` writes one variable's base cell. Everything after
//! the recognized fields is echoed as a free-text note. Any other comment is
//! inert.
//!
//! The body is split on single spaces with no trimming, exactly as written:
//! `( debug stack )` is an ordinary comment because its first field is
//! empty, not `debug`.

use crate::machine::engine::Machine;
use crate::machine::errors::RuntimeError;
use crate::parser::ast::SourceLocation;
use std::io::Write;

impl Machine {
    /// Execute one comment statement. Writes to the debug sink are best
    /// effort; an unknown name in `debug var` is fatal like any other
    /// unresolved identifier.
    pub(crate) fn comment(
        &mut self,
        text: &str,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let parts: Vec<&str> = text.split(' ').collect();
        if parts.len() < 2 || parts[0] != "debug" {
            return Ok(());
        }

        match parts[1] {
            "stack" => {
                let note = parts[2..].join(" ");
                let _ = writeln!(self.debug_sink, "{:?} {}", self.stack.values(), note);
                Ok(())
            }
            "var" => {
                if parts.len() < 3 {
                    return Ok(());
                }
                let name = parts[2];

                let address = match self.addresses.get(name) {
                    Some(&address) => address,
                    None => {
                        return Err(RuntimeError::UnknownDebugVariable {
                            name: name.to_string(),
                            location,
                        });
                    }
                };
                let (variable, offset) = self
                    .space
                    .resolve(address)
                    .ok_or(RuntimeError::BadAddress { address, location })?;

                let note = parts[3..].join(" ");
                let _ = writeln!(
                    self.debug_sink,
                    "{} {} {}",
                    variable.name, variable.data[offset], note
                );
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
