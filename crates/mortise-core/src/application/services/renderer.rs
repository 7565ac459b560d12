//! Renders composition trees with bodies from a `TemplateProvider`.

use std::sync::Arc;

use tracing::debug;

use crate::{
    application::ports::TemplateProvider,
    domain::{RenderContext, Slot, TemplateId, TemplateNode, template::substitute},
    error::MortiseResult,
};

/// Turns a [`TemplateNode`] tree into text.
///
/// Children render first, depth-first in declaration order; each slot's text
/// becomes a parameter of the parent under the slot name. The same tree with
/// the same provider always yields byte-identical text.
#[derive(Clone)]
pub struct TemplateRenderer {
    provider: Arc<dyn TemplateProvider>,
}

impl TemplateRenderer {
    pub fn new(provider: Arc<dyn TemplateProvider>) -> Self {
        Self { provider }
    }

    /// Render a single template with a flat parameter record.
    pub fn render_template(&self, id: TemplateId, params: &RenderContext) -> MortiseResult<String> {
        let body = self.provider.body(id)?;
        Ok(substitute(id, &body, params)?)
    }

    pub fn render(&self, node: &TemplateNode) -> MortiseResult<String> {
        let mut params = node.params().clone();

        for (slot, content) in node.slots() {
            let text = match content {
                Slot::Node(child) => self.render(child)?,
                Slot::List { nodes, separator } => self.render_all(nodes, separator)?,
                Slot::Empty => String::new(),
            };
            params.set(slot.as_str(), text);
        }

        let text = self.render_template(node.id(), &params)?;
        debug!(template = %node.id(), bytes = text.len(), "Rendered template");
        Ok(text)
    }

    /// Render each node and join the results with `separator`.
    pub fn render_all(&self, nodes: &[TemplateNode], separator: &str) -> MortiseResult<String> {
        let parts = nodes
            .iter()
            .map(|n| self.render(n))
            .collect::<MortiseResult<Vec<_>>>()?;
        Ok(parts.join(separator))
    }
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockTemplateProvider;
    use crate::domain::DomainError;
    use crate::error::MortiseError;

    fn provider() -> Arc<dyn TemplateProvider> {
        let mut mock = MockTemplateProvider::new();
        mock.expect_body().returning(|id| {
            Ok(match id {
                TemplateId::EndpointGetRecord => "{{AUTH}}[HttpGet(Name = \"{{ROUTE_NAME}}\")]",
                TemplateId::AuthAttributes => "[Authorize(\"{{PERMISSION}}\")]\n",
                TemplateId::DtoProperty => "public {{TYPE}} {{NAME}};",
                TemplateId::ReadDto => "class {{DTO}} {\n{{PROPERTIES}}\n}",
                _ => "",
            }
            .to_string())
        });
        Arc::new(mock)
    }

    fn endpoint(protected: bool) -> TemplateNode {
        TemplateNode::new(TemplateId::EndpointGetRecord)
            .param("ROUTE_NAME", "GetWidget")
            .when(protected, "AUTH", || {
                TemplateNode::new(TemplateId::AuthAttributes).param("PERMISSION", "CanGetWidget")
            })
    }

    #[test]
    fn splices_children_into_slots() {
        let renderer = TemplateRenderer::new(provider());
        let out = renderer.render(&endpoint(true)).unwrap();
        assert_eq!(out, "[Authorize(\"CanGetWidget\")]\n[HttpGet(Name = \"GetWidget\")]");
    }

    #[test]
    fn untaken_branch_emits_nothing() {
        let renderer = TemplateRenderer::new(provider());
        let out = renderer.render(&endpoint(false)).unwrap();
        assert!(!out.contains("Authorize"));
        assert_eq!(out, "[HttpGet(Name = \"GetWidget\")]");
    }

    #[test]
    fn lists_are_joined_in_order() {
        let renderer = TemplateRenderer::new(provider());
        let property = |name: &str| {
            TemplateNode::new(TemplateId::DtoProperty)
                .param("TYPE", "string")
                .param("NAME", name)
        };
        let tree = TemplateNode::new(TemplateId::ReadDto)
            .param("DTO", "WidgetDto")
            .list("PROPERTIES", vec![property("A"), property("B")], "\n");

        let out = renderer.render(&tree).unwrap();
        assert_eq!(out, "class WidgetDto {\npublic string A;\npublic string B;\n}");
        assert_eq!(renderer.render(&tree).unwrap(), out);
    }

    #[test]
    fn missing_child_parameter_aborts() {
        let renderer = TemplateRenderer::new(provider());
        let tree = TemplateNode::new(TemplateId::EndpointGetRecord)
            .param("ROUTE_NAME", "GetWidget")
            .child("AUTH", TemplateNode::new(TemplateId::AuthAttributes));

        let err = renderer.render(&tree).unwrap_err();
        assert_eq!(
            err,
            MortiseError::Domain(DomainError::MissingParameter {
                template: "auth-attributes",
                field: "PERMISSION".into(),
            })
        );
    }
}
