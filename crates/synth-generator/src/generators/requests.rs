//! Weighted HTTP request generators.
//!
//! A [`RequestGenerator`] first picks a template by weight, then a status
//! from that template's status table. When nothing can be picked the
//! generator returns the sentinel request `{method: "-", path: "-", status: "-"}`.

use serde::Serialize;
use synth_core::schema::{CrudResourceConfig, RequestTemplateConfig};
use synth_core::{RandomSource, RatioSampler, SynthError};

/// Placeholder for a field that could not be selected.
pub const NOTHING: &str = "-";

/// A drawn request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub status: String,
}

impl Request {
    /// The sentinel request.
    pub fn nothing() -> Self {
        Self {
            method: NOTHING.to_string(),
            path: NOTHING.to_string(),
            status: NOTHING.to_string(),
        }
    }

    pub fn is_nothing(&self) -> bool {
        self.method == NOTHING && self.path == NOTHING
    }
}

#[derive(Debug, Clone)]
struct RequestTemplate {
    method: String,
    path: String,
    statuses: RatioSampler<String>,
}

/// Weighted set of request templates.
#[derive(Debug, Clone)]
pub struct RequestGenerator {
    templates: Vec<RequestTemplate>,
    selector: RatioSampler<usize>,
}

impl RequestGenerator {
    pub fn new(configs: &[RequestTemplateConfig]) -> Result<Self, SynthError> {
        let mut templates = Vec::with_capacity(configs.len());
        let mut weights = Vec::with_capacity(configs.len());

        for (i, config) in configs.iter().enumerate() {
            config
                .validate()
                .map_err(|e| e.within(&format!("templates[{i}]")))?;
            templates.push(RequestTemplate {
                method: config.method.clone(),
                path: config.path.clone(),
                statuses: config.status_weights.sampler()?,
            });
            weights.push((i, Some(config.weight)));
        }

        Ok(Self {
            templates,
            selector: RatioSampler::new(weights)?,
        })
    }

    /// Draw a request. Never fails; see the module docs for the sentinel.
    pub fn draw(&self, rng: &mut RandomSource) -> Request {
        let Some(template) = self
            .selector
            .draw(rng)
            .and_then(|&idx| self.templates.get(idx))
        else {
            return Request::nothing();
        };

        let status = template
            .statuses
            .draw(rng)
            .cloned()
            .unwrap_or_else(|| NOTHING.to_string());

        Request {
            method: template.method.clone(),
            path: template.path.clone(),
            status,
        }
    }

    /// `(method, path)` of every template, drawable or not.
    #[cfg(test)]
    pub(crate) fn shapes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.templates
            .iter()
            .map(|t| (t.method.as_str(), t.path.as_str()))
    }
}

/// Request generator scoped to one REST resource.
///
/// Templates live at `/v1/<resource>`; every method except `POST` gets
/// `/<id>` appended at draw time.
#[derive(Debug, Clone)]
pub struct CrudRequestGenerator {
    resource: String,
    inner: RequestGenerator,
}

impl CrudRequestGenerator {
    pub fn new(config: &CrudResourceConfig) -> Result<Self, SynthError> {
        config.validate()?;
        let path = format!("/v1/{}", config.resource);
        let templates: Vec<RequestTemplateConfig> = config
            .method_weights
            .iter()
            .map(|(method, entry)| {
                RequestTemplateConfig::new(
                    method,
                    path.clone(),
                    entry.weight,
                    entry.status_weights.clone(),
                )
            })
            .collect();

        Ok(Self {
            resource: config.resource.clone(),
            inner: RequestGenerator::new(&templates).map_err(|e| e.within("method_weights"))?,
        })
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Draw a request against the resource instance `id`.
    pub fn draw(&self, rng: &mut RandomSource, id: &str) -> Request {
        let mut request = self.inner.draw(rng);
        if !request.is_nothing() && request.method != "POST" {
            request.path = format!("{}/{}", request.path, id);
        }
        request
    }

    /// `(method, path prefix)` of every expanded template.
    #[cfg(test)]
    pub(crate) fn shapes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.shapes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth_core::schema::{CrudMethodWeights, MethodWeight};
    use synth_core::WeightTable;

    fn statuses() -> WeightTable {
        WeightTable::new()
            .with("200", 3)
            .with("404", 1)
            .with("500", 0)
    }

    #[test]
    fn test_draw_from_templates() {
        let mut rng = RandomSource::new(42);
        let generator = RequestGenerator::new(&[
            RequestTemplateConfig::new("GET", "/a", 2, statuses()),
            RequestTemplateConfig::new("POST", "/b", 1, statuses()),
            RequestTemplateConfig::new("PUT", "/never", 0, statuses()),
        ])
        .unwrap();

        for _ in 0..100 {
            let request = generator.draw(&mut rng);
            assert!(
                (request.method == "GET" && request.path == "/a")
                    || (request.method == "POST" && request.path == "/b")
            );
            assert!(request.status == "200" || request.status == "404");
        }
    }

    #[test]
    fn test_sentinel_without_positive_weights() {
        let mut rng = RandomSource::new(42);
        let generator =
            RequestGenerator::new(&[RequestTemplateConfig::new("GET", "/a", 0, statuses())])
                .unwrap();
        assert_eq!(generator.draw(&mut rng), Request::nothing());

        let empty = RequestGenerator::new(&[]).unwrap();
        assert_eq!(empty.draw(&mut rng), Request::nothing());
    }

    #[test]
    fn test_empty_status_table() {
        let mut rng = RandomSource::new(42);
        let generator = RequestGenerator::new(&[RequestTemplateConfig::new(
            "GET",
            "/a",
            1,
            WeightTable::new().with("200", 0),
        )])
        .unwrap();

        let request = generator.draw(&mut rng);
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/a");
        assert_eq!(request.status, NOTHING);
    }

    #[test]
    fn test_invalid_template_weight() {
        let result =
            RequestGenerator::new(&[RequestTemplateConfig::new("GET", "/a", -1, statuses())]);
        assert!(matches!(
            result,
            Err(SynthError::Configuration { field, .. }) if field == "templates[0].weight"
        ));
    }

    #[test]
    fn test_crud_paths() {
        let mut rng = RandomSource::new(42);
        let generator = CrudRequestGenerator::new(&CrudResourceConfig {
            resource: "articles".to_string(),
            method_weights: CrudMethodWeights {
                post: Some(MethodWeight::new(1, statuses())),
                get: Some(MethodWeight::new(1, statuses())),
                put: None,
                delete: Some(MethodWeight::new(1, statuses())),
            },
        })
        .unwrap();
        assert_eq!(generator.resource(), "articles");

        for _ in 0..100 {
            let request = generator.draw(&mut rng, "42");
            match request.method.as_str() {
                "POST" => assert_eq!(request.path, "/v1/articles"),
                "GET" | "DELETE" => assert_eq!(request.path, "/v1/articles/42"),
                other => panic!("Unexpected method {other}"),
            }
        }
    }

    #[test]
    fn test_crud_sentinel_keeps_path() {
        let mut rng = RandomSource::new(42);
        let generator = CrudRequestGenerator::new(&CrudResourceConfig {
            resource: "articles".to_string(),
            method_weights: CrudMethodWeights::default(),
        })
        .unwrap();
        assert_eq!(generator.draw(&mut rng, "42"), Request::nothing());
    }

    #[test]
    fn test_crud_users_default_shapes() {
        let generator = CrudRequestGenerator::new(&CrudResourceConfig::users_default()).unwrap();
        let shapes: Vec<_> = generator.shapes().collect();
        assert_eq!(
            shapes,
            vec![
                ("POST", "/v1/users"),
                ("GET", "/v1/users"),
                ("PUT", "/v1/users"),
                ("DELETE", "/v1/users"),
            ]
        );
    }
}
