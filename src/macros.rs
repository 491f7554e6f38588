/// Implement [`Record`](crate::Record) for a struct by listing its
/// configurable fields in declaration order.
///
/// Each entry is `field NAME`, `field NAME: "help text"`, or `group NAME`.
/// The Rust field name is used as the item name. Fields not listed are
/// private to the record.
///
/// ```
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Database {
///     url: String,
///     pool_size: i32,
/// }
/// flagfig::record!(Database { field url: "Connection string", field pool_size });
///
/// #[derive(Default)]
/// struct AppConfig {
///     verbose: bool,
///     timeout: Duration,
///     database: Database,
///     cache: Vec<String>,
/// }
/// flagfig::record!(AppConfig {
///     field verbose: "Print more",
///     field timeout,
///     group database,
/// });
///
/// let mut config = AppConfig::default();
/// let items = flagfig::scan_config(&mut config);
/// assert_eq!(items.len(), 4);
/// assert_eq!(items[3].cmd_flag_name(), "database-pool_size");
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ident { $($kind:ident $field:ident $(: $help:literal)?),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn describe<'a>(&'a mut self, fields: &mut $crate::Fields<'a>) {
                $(
                    $crate::__record_entry!(
                        $kind fields, self.$field, stringify!($field) $(, $help)?
                    );
                )*
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_entry {
    (field $fields:ident, $value:expr, $name:expr) => {
        $fields.field($name, &mut $value)
    };
    (field $fields:ident, $value:expr, $name:expr, $help:literal) => {
        $fields.field_with_help($name, $help, &mut $value)
    };
    (group $fields:ident, $value:expr, $name:expr) => {
        $fields.group($name, &mut $value)
    };
}
