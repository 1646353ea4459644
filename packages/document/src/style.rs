//! Per-breakpoint style records and the cascade resolver.
//!
//! Styles are sparse: each breakpoint bucket holds only the properties
//! overridden at that breakpoint. Resolution cascades desktop → tablet
//! → mobile with the most specific bucket winning per property.
//! Buckets are `BTreeMap`s so property iteration order is stable,
//! which the publisher relies on for byte-reproducible output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named viewport-size bucket for style overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Desktop,
    Tablet,
    Mobile,
}

/// A partial style-property map (CSS property name → value).
pub type StyleMap = BTreeMap<String, String>;

/// Per-node style record, one sparse bucket per breakpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub desktop: StyleMap,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tablet: StyleMap,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mobile: StyleMap,
}

impl StyleSheet {
    pub fn bucket(&self, breakpoint: Breakpoint) -> &StyleMap {
        match breakpoint {
            Breakpoint::Desktop => &self.desktop,
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::Mobile => &self.mobile,
        }
    }

    pub fn bucket_mut(&mut self, breakpoint: Breakpoint) -> &mut StyleMap {
        match breakpoint {
            Breakpoint::Desktop => &mut self.desktop,
            Breakpoint::Tablet => &mut self.tablet,
            Breakpoint::Mobile => &mut self.mobile,
        }
    }

    /// Shallow-merge `partial` into the given breakpoint bucket.
    pub fn merge(&mut self, breakpoint: Breakpoint, partial: StyleMap) {
        self.bucket_mut(breakpoint).extend(partial);
    }

    /// Compute the effective style at a breakpoint.
    ///
    /// Desktop is the base; tablet overrides desktop; mobile overrides
    /// both. Missing buckets contribute nothing.
    pub fn resolve(&self, breakpoint: Breakpoint) -> StyleMap {
        let mut resolved = self.desktop.clone();
        if matches!(breakpoint, Breakpoint::Tablet | Breakpoint::Mobile) {
            resolved.extend(self.tablet.clone());
        }
        if breakpoint == Breakpoint::Mobile {
            resolved.extend(self.mobile.clone());
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> StyleSheet {
        let mut s = StyleSheet::default();
        s.desktop.insert("color".into(), "red".into());
        s.desktop.insert("padding".into(), "16px".into());
        s.tablet.insert("color".into(), "blue".into());
        s
    }

    #[test]
    fn test_desktop_is_base() {
        let s = sheet();
        let resolved = s.resolve(Breakpoint::Desktop);
        assert_eq!(resolved.get("color").unwrap(), "red");
        assert_eq!(resolved.get("padding").unwrap(), "16px");
    }

    #[test]
    fn test_tablet_overrides_desktop() {
        let s = sheet();
        let resolved = s.resolve(Breakpoint::Tablet);
        assert_eq!(resolved.get("color").unwrap(), "blue");
        assert_eq!(resolved.get("padding").unwrap(), "16px");
    }

    #[test]
    fn test_mobile_inherits_tablet_override() {
        // No mobile bucket: tablet's override still wins at mobile
        let s = sheet();
        let resolved = s.resolve(Breakpoint::Mobile);
        assert_eq!(resolved.get("color").unwrap(), "blue");
    }

    #[test]
    fn test_mobile_wins_over_all() {
        let mut s = sheet();
        s.mobile.insert("color".into(), "green".into());
        let resolved = s.resolve(Breakpoint::Mobile);
        assert_eq!(resolved.get("color").unwrap(), "green");
    }

    #[test]
    fn test_merge_creates_bucket() {
        let mut s = StyleSheet::default();
        let mut partial = StyleMap::new();
        partial.insert("display".into(), "flex".into());
        s.merge(Breakpoint::Mobile, partial);
        assert_eq!(s.mobile.get("display").unwrap(), "flex");
    }

    #[test]
    fn test_breakpoint_serde_names() {
        let json = serde_json::to_string(&Breakpoint::Tablet).unwrap();
        assert_eq!(json, "\"tablet\"");
    }
}
