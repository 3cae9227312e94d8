use super::context::{LOCAL_PREFIX, LocatorContext};
use crate::{
    error::{Error, Result},
    parser::GoParser,
    source::ModuleSource,
    syntax::{GoFile, TypeSpec},
    types::ModuleLocation,
};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace};

/// A top-level type declaration and where it was found.
#[derive(Debug, PartialEq, Eq)]
pub struct TypeDiscovery {
    pub location: ModuleLocation,
    pub file: Rc<GoFile>,
    index: usize,
}

impl TypeDiscovery {
    /// The discovered declaration.
    pub fn spec(&self) -> &TypeSpec {
        &self.file.types[self.index]
    }

    pub fn name(&self) -> &str {
        &self.spec().name
    }
}

type Discoveries = Rc<[Rc<TypeDiscovery>]>;

/// The Declaration Store.
///
/// Parses every compilation unit of a location on first use and keeps the
/// resulting declarations for the lifetime of the locator. The module tree is
/// assumed not to change during a run, so entries are never invalidated.
pub struct Locator {
    source: Box<dyn ModuleSource>,
    parser: GoParser,
    cache: HashMap<ModuleLocation, Discoveries>,
}

impl Locator {
    pub fn new(source: Box<dyn ModuleSource>) -> Result<Self> {
        Ok(Self {
            source,
            parser: GoParser::new()?,
            cache: HashMap::new(),
        })
    }

    /// Finds an unqualified type name among the context's local locations.
    pub fn find_by_identifier(
        &mut self,
        context: &LocatorContext,
        name: &str,
    ) -> Result<Rc<TypeDiscovery>> {
        let candidates = context.candidate_locations(LOCAL_PREFIX);
        self.find_in_locations(name, &candidates)
    }

    /// Finds `prefix.name` among the locations `prefix` may refer to.
    pub fn find_by_qualified_reference(
        &mut self,
        context: &LocatorContext,
        prefix: &str,
        name: &str,
    ) -> Result<Rc<TypeDiscovery>> {
        let candidates = context.candidate_locations(prefix);
        self.find_in_locations(name, &candidates)
            .map_err(|err| match err {
                Error::TypeNotFound { .. } => Error::TypeNotFound {
                    name: format!("{prefix}.{name}"),
                },
                other => other,
            })
    }

    fn find_in_locations(
        &mut self,
        name: &str,
        candidates: &[ModuleLocation],
    ) -> Result<Rc<TypeDiscovery>> {
        for location in candidates {
            trace!("Looking for {} in {}", name, location);
            let discoveries = self.discover_types(location)?;
            if let Some(found) = discoveries.iter().find(|d| d.name() == name) {
                return Ok(Rc::clone(found));
            }
        }
        Err(Error::TypeNotFound {
            name: name.to_string(),
        })
    }

    /// Every top-level type declared at `location`, parsing it on first use.
    pub fn discover_types(&mut self, location: &ModuleLocation) -> Result<Discoveries> {
        if let Some(cached) = self.cache.get(location) {
            return Ok(Rc::clone(cached));
        }

        let units = self.source.load(location)?;
        let mut discoveries = Vec::new();
        for unit in units {
            let file = self
                .parser
                .parse_file(&unit.path, &unit.text)
                .map_err(|err| match err {
                    Error::ParseFailure { reason, .. } => Error::ParseFailure {
                        location: location.to_string(),
                        reason,
                    },
                    other => other,
                })?;
            let file = Rc::new(file);
            discoveries.extend((0..file.types.len()).map(|index| {
                Rc::new(TypeDiscovery {
                    location: location.clone(),
                    file: Rc::clone(&file),
                    index,
                })
            }));
        }

        debug!("Cached {} type declarations from {}", discoveries.len(), location);
        let discoveries: Discoveries = discoveries.into();
        self.cache.insert(location.clone(), Rc::clone(&discoveries));
        Ok(discoveries)
    }

    /// Locations parsed so far.
    pub fn parsed_locations(&self) -> impl Iterator<Item = &ModuleLocation> {
        self.cache.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::context::{ImportAlias, ImportEntry};
    use crate::source::MemoryModuleSource;

    fn locator(source: &Rc<MemoryModuleSource>) -> Locator {
        Locator::new(Box::new(Rc::clone(source))).unwrap()
    }

    #[test]
    fn test_find_by_identifier() {
        let source = Rc::new(MemoryModuleSource::new().with_file(
            "example.com/shop",
            "shop.go",
            "package shop\n\ntype Widget struct{}\n\ntype Store interface{ Get() Widget }\n",
        ));
        let mut locator = locator(&source);
        let ctx = LocatorContext::single_location("example.com/shop");

        let found = locator.find_by_identifier(&ctx, "Store").unwrap();
        assert_eq!(found.location.as_str(), "example.com/shop");
        assert_eq!(found.name(), "Store");
        assert_eq!(found.file.package, "shop");
    }

    #[test]
    fn test_repeated_lookups_hit_the_cache() {
        let source = Rc::new(MemoryModuleSource::new().with_file(
            "example.com/shop",
            "shop.go",
            "package shop\n\ntype Widget struct{}\n\ntype Gadget int\n",
        ));
        let mut locator = locator(&source);
        let ctx = LocatorContext::single_location("example.com/shop");

        let first = locator.find_by_identifier(&ctx, "Widget").unwrap();
        let second = locator.find_by_identifier(&ctx, "Widget").unwrap();
        locator.find_by_identifier(&ctx, "Gadget").unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(source.load_count("example.com/shop"), 1);
    }

    #[test]
    fn test_local_location_takes_precedence_over_alias() {
        let source = Rc::new(
            MemoryModuleSource::new()
                .with_file("example.com/a", "a.go", "package a\n\ntype Widget struct{ A int }\n")
                .with_file("example.com/b", "b.go", "package b\n\ntype Widget struct{ B int }\n"),
        );
        let mut locator = locator(&source);
        let ctx = LocatorContext::single_location("example.com/a").with_entry(ImportEntry::new(
            ImportAlias::Named("ext".to_string()),
            "example.com/b",
        ));

        let found = locator.find_by_identifier(&ctx, "Widget").unwrap();
        assert_eq!(found.location.as_str(), "example.com/a");
        assert_eq!(source.load_count("example.com/b"), 0);

        let found = locator
            .find_by_qualified_reference(&ctx, "ext", "Widget")
            .unwrap();
        assert_eq!(found.location.as_str(), "example.com/b");
    }

    #[test]
    fn test_first_registered_local_entry_wins() {
        let source = Rc::new(
            MemoryModuleSource::new()
                .with_file("example.com/a", "a.go", "package a\n\ntype Widget int\n")
                .with_file("example.com/b", "b.go", "package b\n\ntype Widget string\n"),
        );
        let mut locator = locator(&source);
        let ctx = LocatorContext::single_location("example.com/a")
            .with_entry(ImportEntry::new(ImportAlias::Local, "example.com/b"));

        let found = locator.find_by_identifier(&ctx, "Widget").unwrap();
        assert_eq!(found.location.as_str(), "example.com/a");
    }

    #[test]
    fn test_suffix_matched_locations_are_tried_in_order() {
        let source = Rc::new(
            MemoryModuleSource::new()
                .with_file("example.com/store", "s.go", "package store\n\ntype Other int\n")
                .with_file("github.com/x/store", "s.go", "package store\n\ntype Item int\n"),
        );
        let mut locator = locator(&source);
        let ctx = LocatorContext::single_location("example.com/svc")
            .with_entry(ImportEntry::new(ImportAlias::Unaliased, "example.com/store"))
            .with_entry(ImportEntry::new(ImportAlias::Unaliased, "github.com/x/store"));

        let found = locator
            .find_by_qualified_reference(&ctx, "store", "Item")
            .unwrap();
        assert_eq!(found.location.as_str(), "github.com/x/store");
    }

    #[test]
    fn test_not_found_carries_the_searched_name() {
        let source = Rc::new(MemoryModuleSource::new().with_file(
            "example.com/a",
            "a.go",
            "package a\n",
        ));
        let mut locator = locator(&source);
        let ctx = LocatorContext::single_location("example.com/a");

        let err = locator.find_by_identifier(&ctx, "Missing").unwrap_err();
        assert!(matches!(err, Error::TypeNotFound { ref name } if name == "Missing"));

        let err = locator
            .find_by_qualified_reference(&ctx, "kv", "Store")
            .unwrap_err();
        assert!(matches!(err, Error::TypeNotFound { ref name } if name == "kv.Store"));
    }

    #[test]
    fn test_parse_failure_names_the_location() {
        let source = Rc::new(MemoryModuleSource::new().with_file(
            "example.com/broken",
            "broken.go",
            "package broken\n\ntype Store interface {\n",
        ));
        let mut locator = locator(&source);
        let ctx = LocatorContext::single_location("example.com/broken");

        let err = locator.find_by_identifier(&ctx, "Store").unwrap_err();
        match err {
            Error::ParseFailure { location, reason } => {
                assert_eq!(location, "example.com/broken");
                assert!(reason.contains("broken.go"));
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
        assert_eq!(locator.parsed_locations().count(), 0);
    }

    #[test]
    fn test_missing_location_is_fatal() {
        let source = Rc::new(MemoryModuleSource::new());
        let mut locator = locator(&source);
        let ctx = LocatorContext::single_location("example.com/none");

        let err = locator.find_by_identifier(&ctx, "Store").unwrap_err();
        assert!(matches!(err, Error::LocationNotFound { .. }));
    }
}
