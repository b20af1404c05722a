//! Externs every host is expected to provide.

use cairn_ir::Type;

use crate::externs::{ExternRegistry, ExternSignature};
use crate::print_handler::SharedPrintHandler;
use crate::value::Value;

/// Register `print(message: String)` writing to `printer`.
pub fn register_print(registry: &mut ExternRegistry, printer: SharedPrintHandler) {
    registry.register(
        "print",
        ExternSignature::new(&[Type::String], Type::Unit),
        move |args| {
            if let [Value::Str(message)] = args {
                printer.println(message);
            }
            Ok(Value::Unit)
        },
    );
}
