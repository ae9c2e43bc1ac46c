use std::cmp::Ordering;

use tracing::{debug, error, info, warn};

use crate::condition::Condition;
use crate::mapping::MappingInfo;
use crate::media_type::MediaType;
use crate::pattern::{PathPattern, PathVars};
use crate::request::RequestParts;

use super::{DispatchError, NoopTable, RegistryError, RouteDescriptor, RouteTable};

struct Entry<H> {
    mapping: MappingInfo,
    target: H,
}

/// Accepts `(mapping, target)` installations while the table is still
/// mutable. Ambiguity is rejected here, at installation time, never at
/// dispatch time.
///
/// An attached [`RouteTable`] is notified of each pattern as mappings land,
/// so an outer router can mirror the registry without re-walking it.
pub struct RegistryBuilder<H, T: RouteTable = NoopTable> {
    entries: Vec<Entry<H>>,
    table: T,
}

impl<H: PartialEq> RegistryBuilder<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_table(NoopTable)
    }
}

impl<H: PartialEq> Default for RegistryBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: PartialEq, T: RouteTable> RegistryBuilder<H, T> {
    #[must_use]
    pub fn with_table(table: T) -> Self {
        Self {
            entries: Vec::new(),
            table,
        }
    }

    #[must_use]
    pub fn table(&self) -> &T {
        &self.table
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Install a mapping for a target.
    ///
    /// Reinstalling a structurally equal mapping with an equal target is an
    /// idempotent no-op. A structurally equal mapping with a *different*
    /// target is ambiguous and fatal.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AmbiguousMapping`] on conflict.
    pub fn install(&mut self, mapping: MappingInfo, target: H) -> Result<(), RegistryError> {
        if let Some(existing) = self.entries.iter().find(|e| e.mapping == mapping) {
            if existing.target == target {
                debug!(mapping = %mapping, "duplicate installation ignored");
                return Ok(());
            }
            error!(mapping = %mapping, "rejected ambiguous mapping");
            return Err(RegistryError::AmbiguousMapping {
                mapping: mapping.to_string(),
            });
        }

        let mut routes = 0usize;
        for pattern in mapping.patterns().patterns() {
            self.table.install(&RouteDescriptor::new(&mapping, pattern));
            routes += 1;
        }
        info!(
            mapping = %mapping,
            name = mapping.name().unwrap_or("-"),
            routes,
            "installed mapping"
        );
        self.entries.push(Entry { mapping, target });
        Ok(())
    }

    /// Combine a group-scope declaration with an endpoint-scope one and
    /// install the result.
    ///
    /// # Errors
    ///
    /// Same as [`Self::install`].
    pub fn register(
        &mut self,
        group: Option<&MappingInfo>,
        endpoint: MappingInfo,
        target: H,
    ) -> Result<(), RegistryError> {
        let mapping = match group {
            Some(group) => group.combine(&endpoint),
            None => endpoint,
        };
        self.install(mapping, target)
    }

    /// Freeze the table. The route-table collaborator is dropped; use
    /// [`Self::into_parts`] to keep it.
    #[must_use]
    pub fn seal(self) -> MappingRegistry<H> {
        self.into_parts().0
    }

    #[must_use]
    pub fn into_parts(self) -> (MappingRegistry<H>, T) {
        info!(mappings = self.entries.len(), "registry sealed");
        (
            MappingRegistry {
                entries: self.entries,
            },
            self.table,
        )
    }
}

/// The immutable, sealed dispatch table. Resolves a request to the single
/// best-matching target or explains why none matched.
pub struct MappingRegistry<H> {
    entries: Vec<Entry<H>>,
}

/// A resolved request: the winning target, its mapping, and the path
/// variables bound by the winning pattern.
#[derive(Debug)]
pub struct Matched<'a, H> {
    target: &'a H,
    mapping: &'a MappingInfo,
    pattern: Option<&'a PathPattern>,
    path_vars: PathVars,
}

impl<'a, H> Matched<'a, H> {
    #[must_use]
    pub fn target(&self) -> &'a H {
        self.target
    }

    #[must_use]
    pub fn mapping(&self) -> &'a MappingInfo {
        self.mapping
    }

    /// The winning pattern, absent when the mapping declared no patterns.
    #[must_use]
    pub fn pattern(&self) -> Option<&'a PathPattern> {
        self.pattern
    }

    #[must_use]
    pub fn path_vars(&self) -> &PathVars {
        &self.path_vars
    }

    /// Look up a bound path variable. Last write wins for duplicate names at
    /// different path depths.
    #[inline]
    #[must_use]
    pub fn path_var(&self, name: &str) -> Option<&str> {
        self.path_vars
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

struct Candidate<'a> {
    index: usize,
    pattern: Option<&'a PathPattern>,
    vars: PathVars,
}

impl<H> MappingRegistry<H> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a request to its single best target.
    ///
    /// Every mapping is screened aspect by aspect: patterns, then methods,
    /// params, headers, consumes, produces. Among full matches the winner
    /// has the most specific pattern, then the most specific produces and
    /// consumes conditions, then earliest installation.
    ///
    /// # Errors
    ///
    /// [`DispatchError::UnsupportedMediaType`] when a mapping failed only on
    /// `Content-Type`, [`DispatchError::NotAcceptable`] when one failed only
    /// on `Accept`, [`DispatchError::NoRouteMatched`] otherwise.
    pub fn match_request(&self, request: &RequestParts) -> Result<Matched<'_, H>, DispatchError> {
        let mut best: Option<Candidate<'_>> = None;
        let mut supported: Vec<MediaType> = Vec::new();
        let mut producible: Vec<MediaType> = Vec::new();
        let mut content_type_rejected = false;
        let mut accept_rejected = false;

        for (index, entry) in self.entries.iter().enumerate() {
            let m = &entry.mapping;
            let Some((pattern, vars)) = m.patterns().best_match(request.path()) else {
                continue;
            };
            if !m.methods().matches(request)
                || !m.params().matches(request)
                || !m.headers().matches(request)
            {
                continue;
            }
            if !m.consumes().matches(request) {
                content_type_rejected = true;
                collect_unique(&mut supported, m.consumes().consumable_media_types());
                continue;
            }
            if !m.produces().matches(request) {
                accept_rejected = true;
                collect_unique(&mut producible, m.produces().producible_media_types());
                continue;
            }

            let candidate = Candidate {
                index,
                pattern,
                vars,
            };
            let wins = match &best {
                Some(current) => self.candidate_cmp(&candidate, current) == Ordering::Less,
                None => true,
            };
            if wins {
                best = Some(candidate);
            }
        }

        match best {
            Some(candidate) => {
                let entry = &self.entries[candidate.index];
                debug!(
                    mapping = %entry.mapping,
                    method = %request.method(),
                    path = %request.path(),
                    "resolved request"
                );
                Ok(Matched {
                    target: &entry.target,
                    mapping: &entry.mapping,
                    pattern: candidate.pattern,
                    path_vars: candidate.vars,
                })
            }
            None if content_type_rejected => Err(DispatchError::UnsupportedMediaType { supported }),
            None if accept_rejected => Err(DispatchError::NotAcceptable { producible }),
            None => {
                warn!(
                    method = %request.method(),
                    path = %request.path(),
                    "no route matched"
                );
                Err(DispatchError::NoRouteMatched {
                    method: request.method().clone(),
                    path: request.path().to_string(),
                })
            }
        }
    }

    /// Flatten the table into serialisable route descriptors, one per
    /// installed pattern, in installation order.
    #[must_use]
    pub fn dump(&self) -> Vec<RouteDescriptor> {
        self.entries
            .iter()
            .flat_map(|entry| {
                entry
                    .mapping
                    .patterns()
                    .patterns()
                    .map(|p| RouteDescriptor::new(&entry.mapping, p))
            })
            .collect()
    }

    fn candidate_cmp(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        let ma = &self.entries[a.index].mapping;
        let mb = &self.entries[b.index].mapping;
        pattern_cmp(a.pattern, b.pattern)
            .then_with(|| ma.produces().specificity_cmp(mb.produces()))
            .then_with(|| ma.consumes().specificity_cmp(mb.consumes()))
            .then_with(|| a.index.cmp(&b.index))
    }
}

/// Pattern-less mappings match everything and rank below any real pattern.
fn pattern_cmp(a: Option<&PathPattern>, b: Option<&PathPattern>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.specificity_cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn collect_unique(into: &mut Vec<MediaType>, media_types: Vec<MediaType>) {
    for mt in media_types {
        if !into.contains(&mt) {
            into.push(mt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn mapping(build: impl FnOnce(crate::mapping::MappingInfoBuilder) -> crate::mapping::MappingInfoBuilder) -> MappingInfo {
        build(MappingInfo::builder()).build().unwrap()
    }

    #[test]
    fn duplicate_installation_is_idempotent() {
        let mut builder = RegistryBuilder::new();
        builder
            .install(mapping(|b| b.paths(["/items"]).get()), "list")
            .unwrap();
        builder
            .install(mapping(|b| b.paths(["/items"]).get()), "list")
            .unwrap();
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn equal_mapping_different_target_is_ambiguous() {
        let mut builder = RegistryBuilder::new();
        builder
            .install(mapping(|b| b.paths(["/items"]).get()), "list")
            .unwrap();
        let err = builder
            .install(mapping(|b| b.paths(["/items"]).get()), "other")
            .unwrap_err();
        assert!(matches!(err, RegistryError::AmbiguousMapping { .. }));
    }

    #[test]
    fn register_merges_group_scope_first() {
        let group = mapping(|b| b.paths(["/api"]));
        let mut builder = RegistryBuilder::new();
        builder
            .register(Some(&group), mapping(|b| b.paths(["/items"]).get()), "list")
            .unwrap();
        builder
            .register(None, mapping(|b| b.paths(["/health"]).get()), "health")
            .unwrap();
        let registry = builder.seal();

        let grouped = registry
            .match_request(&RequestParts::new(Method::GET, "/api/items"))
            .unwrap();
        assert_eq!(*grouped.target(), "list");
        let bare = registry
            .match_request(&RequestParts::new(Method::GET, "/health"))
            .unwrap();
        assert_eq!(*bare.target(), "health");
    }

    #[test]
    fn same_path_different_methods_coexist() {
        let mut builder = RegistryBuilder::new();
        builder
            .install(mapping(|b| b.paths(["/items"]).get()), "list")
            .unwrap();
        builder
            .install(mapping(|b| b.paths(["/items"]).post()), "create")
            .unwrap();
        let registry = builder.seal();
        assert_eq!(registry.len(), 2);

        let get = registry
            .match_request(&RequestParts::new(Method::GET, "/items"))
            .unwrap();
        assert_eq!(*get.target(), "list");
        let post = registry
            .match_request(&RequestParts::new(Method::POST, "/items"))
            .unwrap();
        assert_eq!(*post.target(), "create");
    }

    #[test]
    fn table_receives_one_descriptor_per_pattern() {
        let mut builder = RegistryBuilder::with_table(Vec::new());
        builder
            .install(
                mapping(|b| b.paths(["/items", "/things"]).get().name("list")),
                "list",
            )
            .unwrap();
        let routes = builder.table();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].pattern, "/items");
        assert_eq!(routes[0].methods, ["GET"]);
        assert_eq!(routes[0].name.as_deref(), Some("list"));
    }

    #[test]
    fn more_specific_pattern_wins() {
        let mut builder = RegistryBuilder::new();
        builder
            .install(mapping(|b| b.paths(["/items/**"]).get()), "catch_all")
            .unwrap();
        builder
            .install(mapping(|b| b.paths(["/items/{id}"]).get()), "by_id")
            .unwrap();
        let registry = builder.seal();
        let matched = registry
            .match_request(&RequestParts::new(Method::GET, "/items/42"))
            .unwrap();
        assert_eq!(*matched.target(), "by_id");
        assert_eq!(matched.path_var("id"), Some("42"));
    }

    #[test]
    fn unmatched_content_type_reports_supported_types() {
        let mut builder = RegistryBuilder::new();
        builder
            .install(
                mapping(|b| b.paths(["/items"]).post().consumes(["application/json"])),
                "create",
            )
            .unwrap();
        let registry = builder.seal();
        let request = RequestParts::new(Method::POST, "/items")
            .with_header("Content-Type", "text/plain");
        let err = registry.match_request(&request).unwrap_err();
        match err {
            DispatchError::UnsupportedMediaType { supported } => {
                assert_eq!(supported.len(), 1);
                assert_eq!(supported[0].to_string(), "application/json");
            }
            other => panic!("expected UnsupportedMediaType, got {other:?}"),
        }
    }

    #[test]
    fn unmatched_accept_reports_producible_types() {
        let mut builder = RegistryBuilder::new();
        builder
            .install(
                mapping(|b| b.paths(["/items"]).get().produces(["application/json"])),
                "list",
            )
            .unwrap();
        let registry = builder.seal();
        let request =
            RequestParts::new(Method::GET, "/items").with_header("Accept", "image/png");
        let err = registry.match_request(&request).unwrap_err();
        assert!(matches!(err, DispatchError::NotAcceptable { .. }));
    }

    #[test]
    fn method_mismatch_is_no_route_matched() {
        let mut builder = RegistryBuilder::new();
        builder
            .install(mapping(|b| b.paths(["/items"]).get()), "list")
            .unwrap();
        let registry = builder.seal();
        let err = registry
            .match_request(&RequestParts::new(Method::DELETE, "/items"))
            .unwrap_err();
        assert!(matches!(err, DispatchError::NoRouteMatched { .. }));
    }
}
