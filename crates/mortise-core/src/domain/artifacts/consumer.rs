//! Message-bus consumer artifacts and their test-fixture registration.

use crate::domain::entities::Consumer;
use crate::domain::paths::PathResolver;
use crate::domain::template::{TemplateId, TemplateNode};
use crate::domain::value_objects::PathCategory;

use super::Artifact;

#[derive(Debug, Clone)]
pub struct ConsumerPlan<'a> {
    resolver: &'a PathResolver,
    consumer: &'a Consumer,
    db_context: &'a str,
}

impl<'a> ConsumerPlan<'a> {
    pub fn new(resolver: &'a PathResolver, db_context: &'a str, consumer: &'a Consumer) -> Self {
        Self {
            resolver,
            consumer,
            db_context,
        }
    }

    /// Namespace the consumer class is declared in.
    pub fn namespace(&self) -> String {
        self.resolver
            .namespace(PathCategory::Consumer, &self.consumer.domain_directory)
    }

    /// The consumer class. Database members are a branch on `uses_db`.
    pub fn consumer_file(&self) -> Artifact {
        let c = self.consumer;
        let path = self.resolver.resolve(
            PathCategory::Consumer,
            &c.domain_directory,
            &c.consumer_name,
        );
        let db_namespace = self.resolver.namespace(PathCategory::DbContext, "");

        let tree = TemplateNode::new(TemplateId::Consumer)
            .param("NAMESPACE", path.module_id())
            .param("CONSUMER", c.consumer_name.as_str())
            .param("MESSAGE", c.message_name.as_str())
            .when(c.uses_db, "DB_USING", || using_directive(&db_namespace))
            .when(c.uses_db, "DB_MEMBERS", || {
                TemplateNode::new(TemplateId::ConsumerDbMembers)
                    .param("CONSUMER", c.consumer_name.as_str())
                    .param("DB_CONTEXT", self.db_context)
            });
        Artifact::new(path, tree)
    }

    /// Bus registration inserted into the fixture.
    pub fn registration(&self) -> TemplateNode {
        TemplateNode::new(TemplateId::ConsumerRegistration)
            .param("CONSUMER", self.consumer.consumer_name.as_str())
    }

    /// `using` line for the fixture.
    pub fn using_directive(&self) -> TemplateNode {
        using_directive(&self.namespace())
    }
}

/// Integration-test fixture hosting the in-memory bus harness. Created on
/// first use when the solution has none yet.
pub fn fixture_file(resolver: &PathResolver, db_context: &str) -> Artifact {
    let path = resolver.resolve(PathCategory::TestFixture, "", "TestFixture");
    let tree = TemplateNode::new(TemplateId::TestFixture)
        .param("NAMESPACE", path.module_id())
        .param("PROJECT", resolver.layout().project_base_name.as_str())
        .param("DB_CONTEXT", db_context)
        .param(
            "DB_NAMESPACE",
            resolver.namespace(PathCategory::DbContext, ""),
        );
    Artifact::new(path, tree)
}

fn using_directive(namespace: &str) -> TemplateNode {
    TemplateNode::new(TemplateId::UsingDirective).param("NAMESPACE", namespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::paths::SolutionLayout;
    use std::path::Path;

    fn resolver() -> PathResolver {
        PathResolver::new(SolutionLayout::new("/out", "Acme"))
    }

    #[test]
    fn consumer_lives_in_its_domain_directory() {
        let r = resolver();
        let consumer = Consumer::new("AddToBook", "BookPublished", "Books");
        let plan = ConsumerPlan::new(&r, "AppDbContext", &consumer);
        let file = plan.consumer_file();

        assert_eq!(
            file.path.full_path(),
            Path::new("/out/src/Acme.Api/Domain/Books/Features/AddToBook.cs")
        );
        assert_eq!(plan.namespace(), "Acme.Api.Domain.Books.Features");
        assert_eq!(file.tree.render_order(), vec![TemplateId::Consumer]);
    }

    #[test]
    fn database_members_only_when_requested() {
        let r = resolver();
        let consumer = Consumer::new("AddToBook", "BookPublished", "Books").with_db();
        let plan = ConsumerPlan::new(&r, "AppDbContext", &consumer);
        assert_eq!(
            plan.consumer_file().tree.render_order(),
            vec![
                TemplateId::UsingDirective,
                TemplateId::ConsumerDbMembers,
                TemplateId::Consumer
            ]
        );
    }

    #[test]
    fn fixture_sits_at_the_integration_project_root() {
        let file = fixture_file(&resolver(), "AppDbContext");
        assert_eq!(
            file.path.full_path(),
            Path::new("/out/tests/Acme.IntegrationTests/TestFixture.cs")
        );
        assert_eq!(file.tree.params().get("NAMESPACE"), Some("Acme.IntegrationTests"));
    }
}
