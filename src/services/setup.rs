//! App setup service: metaobject definition lifecycle and shop info

use std::sync::Arc;

use crate::error::AppResult;
use crate::notify::{Notice, Notifier};
use crate::shopify::ShopifyRepository;

#[derive(Clone)]
pub struct SetupService {
    notifier: Arc<dyn Notifier>,
}

impl SetupService {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Definition id when the metaobject type has been declared
    pub async fn status(&self, remote: &ShopifyRepository) -> AppResult<Option<String>> {
        remote.definition().await
    }

    /// Declare the metaobject type for this shop
    pub async fn configure(&self, remote: &ShopifyRepository) -> AppResult<()> {
        remote.create_definition().await?;

        tracing::info!("Metaobject definition created");
        self.notifier.notify(Notice::AppConfigured);
        Ok(())
    }

    /// Drop the metaobject type declaration; tolerates one that was
    /// never created.
    pub async fn teardown(&self, remote: &ShopifyRepository) -> AppResult<()> {
        remote.remove_definition().await?;

        tracing::info!("Metaobject definition removed");
        Ok(())
    }

    /// UTC offset of the shop, for shop-local schedule display
    pub async fn shop_timezone_offset(&self, remote: &ShopifyRepository) -> AppResult<String> {
        remote.shop_timezone_offset().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::RecordingNotifier;
    use crate::shopify::testing::ScriptedAdmin;
    use serde_json::json;

    #[tokio::test]
    async fn test_configure_declares_the_definition_and_notifies() {
        let notifier = Arc::new(RecordingNotifier::default());
        let service = SetupService::new(notifier.clone());
        let admin = ScriptedAdmin::new(vec![json!({
            "data": { "metaobjectDefinitionCreate": { "metaobjectDefinition": { "id": "gid://shopify/MetaobjectDefinition/3" }, "userErrors": [] } }
        })]);
        let remote = ShopifyRepository::new(admin.clone());

        service.configure(&remote).await.unwrap();

        assert_eq!(admin.operations(), vec!["definitionCreate"]);
        assert_eq!(notifier.notices(), vec![Notice::AppConfigured]);
    }

    #[tokio::test]
    async fn test_status_reports_the_definition_id() {
        let service = SetupService::new(Arc::new(RecordingNotifier::default()));
        let admin = ScriptedAdmin::new(vec![
            json!({ "data": { "metaobjectDefinitionByType": null } }),
            json!({ "data": { "metaobjectDefinitionByType": { "id": "gid://shopify/MetaobjectDefinition/3" } } }),
        ]);
        let remote = ShopifyRepository::new(admin);

        assert_eq!(service.status(&remote).await.unwrap(), None);
        assert_eq!(
            service.status(&remote).await.unwrap().as_deref(),
            Some("gid://shopify/MetaobjectDefinition/3")
        );
    }
}
