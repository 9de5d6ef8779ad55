//! Raw, non-mutating writes into the active breakpoint.

use super::{
    Breakpoint, StyleDeclaration, StyleRecord, StyleValue, generate_scope_id,
};
use crate::config::Config;

/// Writes declarations into exactly one breakpoint bucket.
///
/// Writes never cascade: setting a value while editing tablet touches only the
/// tablet bucket. Every operation returns a new record, so callers can compare
/// it with the old one and skip no-op saves. The first write seeds a scope id.
///
/// ```
/// use costered::{Config, style::{Breakpoint, CascadeWriter, StyleRecord}};
///
/// let config = Config::default();
/// let writer = CascadeWriter::new(Breakpoint::Tablet, &config);
///
/// let record = writer.set(&StyleRecord::new(), "width", "60rem");
/// assert!(record.id.is_some());
/// assert_eq!(record.tablet.len(), 1);
/// assert!(record.desktop.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CascadeWriter<'a> {
    breakpoint: Breakpoint,
    config: &'a Config,
}

impl<'a> CascadeWriter<'a> {
    pub fn new(breakpoint: Breakpoint, config: &'a Config) -> Self {
        Self { breakpoint, config }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    /// Set one property. Absent values delete it.
    pub fn set(
        &self,
        record: &StyleRecord,
        key: &str,
        value: impl Into<StyleValue>,
    ) -> StyleRecord {
        let mut next = self.seeded(record);
        self.apply(&mut next, key, value.into());
        next
    }

    /// Set several properties at once.
    pub fn set_many<K, V>(
        &self,
        record: &StyleRecord,
        patch: impl IntoIterator<Item = (K, V)>,
    ) -> StyleRecord
    where
        K: AsRef<str>,
        V: Into<StyleValue>,
    {
        let mut next = self.seeded(record);
        for (key, value) in patch {
            self.apply(&mut next, key.as_ref(), value.into());
        }
        next
    }

    /// Write already-built declarations, such as the output of
    /// [`parse_inline_declarations`](super::parse_inline_declarations).
    pub fn set_declarations(
        &self,
        record: &StyleRecord,
        declarations: impl IntoIterator<Item = StyleDeclaration>,
    ) -> StyleRecord {
        let mut next = self.seeded(record);
        for decl in declarations {
            let important = decl.important;
            let value = decl.value;
            match StyleDeclaration::normalized(
                &decl.property,
                value,
                self.config.is_unitless(&decl.property),
            ) {
                Some(normalized) => {
                    let normalized = if important {
                        normalized.into_important()
                    } else {
                        normalized
                    };
                    next.bucket_mut(self.breakpoint).upsert(normalized);
                }
                None => next.bucket_mut(self.breakpoint).remove(&decl.property),
            }
        }
        next
    }

    /// Remove one property from the active bucket.
    pub fn unset(&self, record: &StyleRecord, key: &str) -> StyleRecord {
        let mut next = self.seeded(record);
        next.bucket_mut(self.breakpoint).remove(key);
        next
    }

    /// Remove several properties from the active bucket.
    pub fn unset_many<'k>(
        &self,
        record: &StyleRecord,
        keys: impl IntoIterator<Item = &'k str>,
    ) -> StyleRecord {
        let mut next = self.seeded(record);
        let bucket = next.bucket_mut(self.breakpoint);
        for key in keys {
            bucket.remove(key);
        }
        next
    }

    fn seeded(&self, record: &StyleRecord) -> StyleRecord {
        let mut next = record.clone();
        if next.id.is_none() {
            next.id = Some(generate_scope_id());
        }
        next
    }

    fn apply(&self, record: &mut StyleRecord, key: &str, value: StyleValue) {
        let bucket = record.bucket_mut(self.breakpoint);
        match StyleDeclaration::normalized(key, value, self.config.is_unitless(key)) {
            Some(decl) => bucket.upsert(decl),
            None => bucket.remove(key),
        }
    }
}
