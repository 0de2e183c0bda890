//! Macros for building structured record payloads.
//!
//! # Examples
//!
//! ```
//! use rust_gelf_target::structured;
//! use rust_gelf_target::prelude::*;
//!
//! // Positional form
//! let list = structured!["first", "second"];
//! assert_eq!(list.get_index(1), Some(&FieldValue::from("second")));
//!
//! // Keyed form
//! let map = structured! { "short" => "S", "full" => "F", "x" => 1 };
//! assert_eq!(map.get_named("x"), Some(&FieldValue::from(1)));
//! ```

/// Build a [`StructuredPayload`](crate::core::StructuredPayload).
///
/// `key => value` pairs insert named (or explicitly indexed) entries; a plain
/// list of values pushes positional entries starting at index 0.
#[macro_export]
macro_rules! structured {
    () => {
        $crate::core::StructuredPayload::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut payload = $crate::core::StructuredPayload::new();
        $( payload.insert($key, $value); )+
        payload
    }};
    ($($value:expr),+ $(,)?) => {{
        let mut payload = $crate::core::StructuredPayload::new();
        $( payload.push($value); )+
        payload
    }};
}
