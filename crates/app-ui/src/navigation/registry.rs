//! Route registry: the closed set of routes and the template <-> path mapping

use serde::{Deserialize, Serialize};

use super::route::{RouteId, RouteParams, RouteTemplate, Segment};
use super::{NavigationError, Result};

/// Result of matching a path against the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMatch {
    /// The matched route
    pub route: RouteId,
    /// Extracted (decoded) parameter values
    pub params: RouteParams,
}

/// A registered route
#[derive(Debug, Clone)]
struct Registration {
    route: RouteId,
    template: RouteTemplate,
}

/// Registry of route templates
///
/// Route identifiers are unique and no two templates may match the same
/// concrete path; both are enforced at registration time.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    routes: Vec<Registration>,
}

impl RouteRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every application route
    pub fn standard() -> Result<Self> {
        Self::with_routes(RouteId::all().into_iter().map(|route| (route, route.template())))
    }

    /// Create a registry from `(route, template)` pairs
    ///
    /// Fails on the first route that cannot be registered.
    pub fn with_routes<'a>(routes: impl IntoIterator<Item = (RouteId, &'a str)>) -> Result<Self> {
        let mut registry = Self::new();
        for (route, template) in routes {
            registry.register(route, template)?;
        }
        Ok(registry)
    }

    /// Register a route under a template
    pub fn register(&mut self, route: RouteId, template: &str) -> Result<()> {
        if self.contains(route) {
            return Err(NavigationError::DuplicateRoute(route));
        }

        let template = RouteTemplate::parse(template)?;
        if let Some(existing) = self.routes.iter().find(|r| r.template.overlaps(&template)) {
            return Err(NavigationError::AmbiguousTemplate {
                template: template.to_string(),
                existing: existing.route,
            });
        }

        self.routes.push(Registration { route, template });
        Ok(())
    }

    /// Whether a route is registered
    pub fn contains(&self, route: RouteId) -> bool {
        self.routes.iter().any(|r| r.route == route)
    }

    /// Template registered for a route
    pub fn template(&self, route: RouteId) -> Option<&RouteTemplate> {
        self.routes
            .iter()
            .find(|r| r.route == route)
            .map(|r| &r.template)
    }

    /// Substitute parameter values into a route's template
    ///
    /// Values are percent-encoded. Extra parameters are ignored; an absent or
    /// empty value for a placeholder is a [`NavigationError::MissingParameter`].
    pub fn resolve(&self, route: RouteId, params: &RouteParams) -> Result<String> {
        let template = self
            .template(route)
            .ok_or(NavigationError::UnknownRoute(route))?;

        let mut parts = Vec::with_capacity(template.segments().len());
        for segment in template.segments() {
            match segment {
                Segment::Literal(literal) => parts.push(literal.clone()),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| NavigationError::MissingParameter {
                            route,
                            param: name.clone(),
                        })?;
                    parts.push(urlencoding::encode(value).into_owned());
                }
            }
        }

        Ok(parts.join("/"))
    }

    /// Match a concrete path to a route and its parameters
    ///
    /// A leading `/` is ignored. An empty parameter segment never matches.
    pub fn match_path(&self, path: &str) -> Result<RouteMatch> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let actual: Vec<&str> = trimmed.split('/').collect();

        self.routes
            .iter()
            .find_map(|registration| {
                Self::match_segments(registration.template.segments(), &actual).map(|params| {
                    RouteMatch {
                        route: registration.route,
                        params,
                    }
                })
            })
            .ok_or_else(|| NavigationError::NoMatch(path.to_string()))
    }

    /// Extract one parameter from a path, if the path matches at all
    pub fn extract_argument(&self, path: &str, name: &str) -> Option<String> {
        self.match_path(path)
            .ok()
            .and_then(|m| m.params.get(name).cloned())
    }

    fn match_segments(pattern: &[Segment], actual: &[&str]) -> Option<RouteParams> {
        if pattern.len() != actual.len() {
            return None;
        }

        let mut params = RouteParams::new();
        for (segment, value) in pattern.iter().zip(actual.iter()) {
            match segment {
                Segment::Literal(expected) => {
                    if expected != value {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), urlencoding::decode(value).ok()?.into_owned());
                }
            }
        }

        Some(params)
    }
}
