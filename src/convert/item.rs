//! Request item building
//!
//! Composes method, URL, headers, body and the optional test event of one
//! collection item.

use super::ConversionError;
use super::body::BodyAssembler;
use super::headers::HeaderSession;
use super::properties::PropertyTreeBuilder;
use super::script::extract_test_script;
use super::url::build_url;
use crate::config::ConversionSection;
use crate::models::{Event, HttpMethod, Item, LiteralCoercion, Operation, Request};

/// Builds collection items from operations
#[derive(Debug, Clone)]
pub struct RequestItemBuilder {
    body: BodyAssembler,
    coercion: LiteralCoercion,
    test_script_extension: String,
}

impl Default for RequestItemBuilder {
    fn default() -> Self {
        Self::new(&ConversionSection::default())
    }
}

impl RequestItemBuilder {
    pub fn new(settings: &ConversionSection) -> Self {
        let tree = PropertyTreeBuilder::new(settings.max_depth);
        Self {
            body: BodyAssembler::new(tree, settings.literal_coercion),
            coercion: settings.literal_coercion,
            test_script_extension: settings.test_script_extension.clone(),
        }
    }

    /// Build one collection item.
    ///
    /// # Arguments
    ///
    /// * `headers` - Session header mapping; updated with this operation's headers.
    /// * `url` - Path template; also used as the item name.
    /// * `method` - HTTP method in any case.
    /// * `operation` - The operation to convert.
    ///
    /// # Returns
    ///
    /// The item, or the error that made the operation's body unbuildable.
    pub fn build_item(
        &self,
        headers: &mut HeaderSession,
        url: &str,
        method: &str,
        operation: &Operation,
    ) -> Result<Item, ConversionError> {
        let method = method.trim().to_uppercase();

        let header = headers.collect(
            &operation.consumes,
            &operation.produces,
            &operation.parameters,
            self.coercion,
        );

        let carries_body = method
            .parse::<HttpMethod>()
            .map(|m| m.carries_body())
            .unwrap_or(false);
        let body = if carries_body {
            Some(self.body.assemble(&operation.parameters)?)
        } else {
            None
        };

        let event = extract_test_script(&operation.extensions, &self.test_script_extension)
            .map(|script| vec![Event::test(script)])
            .unwrap_or_default();

        Ok(Item {
            name: url.to_string(),
            request: Request {
                method,
                url: build_url(url, &operation.parameters, self.coercion),
                header,
                body,
                description: operation
                    .summary
                    .clone()
                    .or_else(|| operation.description.clone()),
            },
            event,
        })
    }
}
