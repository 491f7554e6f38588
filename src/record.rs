//! Configuration records and item discovery.
//!
//! A record describes its configurable fields through [`Record::describe`],
//! handing each one to a [`Fields`] collector as a live `&mut`. Discovery
//! ([`scan_config`]) runs that table and returns one [`ConfigItem`] per scalar
//! field, in declaration order. A grouping field contributes its own scalar
//! fields as one section; groups declared inside a group are not descended
//! into.
//!
//! Fields left out of the table are private to the record: no source can
//! reach them.

use tracing::debug;

use crate::naming;
use crate::value::Slot;

/// A struct whose fields can be configured.
///
/// Usually implemented with the [`record!`](crate::record!) macro:
///
/// ```ignore
/// struct Server { host: String, port: i32 }
/// flagfig::record!(Server { field host: "Hostname to bind", field port });
/// ```
pub trait Record {
    /// Hand every configurable field to `fields`, in declaration order.
    fn describe<'a>(&'a mut self, fields: &mut Fields<'a>);
}

/// One addressable configuration slot.
#[derive(Debug)]
pub struct ConfigItem<'a> {
    /// Name of the enclosing group, empty for top-level fields.
    pub section: String,
    pub name: String,
    pub help: String,
    pub value: Slot<'a>,
}

impl<'a> ConfigItem<'a> {
    pub fn env_var_name(&self, prefix: &str) -> String {
        naming::env_var_name(prefix, &self.section, &self.name)
    }

    pub fn ini_key(&self) -> String {
        naming::ini_key(&self.section, &self.name)
    }

    pub fn cmd_flag_name(&self) -> String {
        naming::cmd_flag_name(&self.section, &self.name)
    }
}

/// Collector passed to [`Record::describe`].
pub struct Fields<'a> {
    section: Option<String>,
    items: Vec<ConfigItem<'a>>,
}

impl<'a> Fields<'a> {
    fn root() -> Self {
        Self {
            section: None,
            items: Vec::new(),
        }
    }

    /// A scalar field without help text.
    pub fn field<T: 'static>(&mut self, name: &str, value: &'a mut T) {
        self.field_with_help(name, "", value);
    }

    /// A scalar field with help text shown in `--help`.
    pub fn field_with_help<T: 'static>(&mut self, name: &str, help: &str, value: &'a mut T) {
        self.items.push(ConfigItem {
            section: self.section.clone().unwrap_or_default(),
            name: name.to_string(),
            help: help.to_string(),
            value: Slot::new(value),
        });
    }

    /// A grouping field. Its scalar fields become the section `name`.
    pub fn group<G: Record>(&mut self, name: &str, group: &'a mut G) {
        if let Some(outer) = &self.section {
            debug!(section = %outer, group = name, "skipping group nested inside a group");
            return;
        }
        let mut nested = Fields {
            section: Some(name.to_string()),
            items: Vec::new(),
        };
        group.describe(&mut nested);
        self.items.extend(nested.items);
    }
}

/// Discover every configurable field of `record`.
///
/// Items are created fresh on each call and borrow `record` mutably for as
/// long as they live.
pub fn scan_config<R: Record>(record: &mut R) -> Vec<ConfigItem<'_>> {
    let mut fields = Fields::root();
    record.describe(&mut fields);
    debug!(items = fields.items.len(), "discovered config items");
    fields.items
}
