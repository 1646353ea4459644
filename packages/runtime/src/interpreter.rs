//! Event dispatch over stored interaction bindings.

use pageforge_document::{Action, EventKind, VisibilityVerb};
use pageforge_editor::{Document, Mutation};
use serde_json::json;
use std::collections::BTreeMap;

/// An action effect the core cannot perform itself; the embedding
/// collaborator carries it out (browser navigation, scrolling, form
/// transport).
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    OpenUrl { url: String, new_tab: bool },
    ScrollTo { node_id: String },
    SubmitForm { endpoint: Option<String> },
}

/// Per-binding execution record.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingOutcome {
    /// The action ran (internally, or was emitted as an effect).
    Applied { binding_id: String, action: String },
    /// The action's target did not resolve or its payload was
    /// incomplete; execution continued with the next binding.
    Skipped { binding_id: String, reason: String },
    /// Unrecognized action type; warned and skipped.
    UnknownAction { binding_id: String },
}

/// Result of one dispatched UI event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub outcomes: Vec<BindingOutcome>,
}

/// Execute all bindings on `node_id` matching `event`, strictly in
/// declared order. A binding that fails to resolve never aborts the
/// ones after it. Unknown nodes and nodes without bindings dispatch
/// to nothing.
pub fn dispatch(doc: &mut Document, node_id: &str, event: EventKind) -> DispatchResult {
    let mut result = DispatchResult::default();

    let bindings: Vec<_> = match doc.get_node(node_id) {
        Some(node) => node
            .interactions
            .iter()
            .filter(|b| b.event == event)
            .cloned()
            .collect(),
        None => return result,
    };

    for binding in bindings {
        tracing::info!(
            binding = %binding.id,
            action = binding.action.kind(),
            active_page = %doc.project.active_page_id,
            event = ?event,
            "dispatching interaction"
        );
        let outcome = execute(doc, &binding.id, &binding.action, &mut result.effects);
        result.outcomes.push(outcome);
    }

    result
}

fn execute(
    doc: &mut Document,
    binding_id: &str,
    action: &Action,
    effects: &mut Vec<Effect>,
) -> BindingOutcome {
    let applied = |action: &Action| BindingOutcome::Applied {
        binding_id: binding_id.to_string(),
        action: action.kind().to_string(),
    };
    let skipped = |reason: &str| BindingOutcome::Skipped {
        binding_id: binding_id.to_string(),
        reason: reason.to_string(),
    };

    match action {
        Action::Navigate { page_id } => {
            let Some(page_id) = page_id else {
                return skipped("navigate without a target page");
            };
            if doc.get_page(page_id).is_none() {
                return skipped("navigate target page does not resolve");
            }
            match doc.apply(Mutation::SetActivePage {
                page_id: page_id.clone(),
            }) {
                Ok(()) => applied(action),
                Err(err) => skipped(&err.to_string()),
            }
        }

        Action::OpenUrl { url, new_tab } => {
            let Some(url) = url else {
                return skipped("open_url without a url");
            };
            effects.push(Effect::OpenUrl {
                url: url.clone(),
                new_tab: *new_tab,
            });
            applied(action)
        }

        Action::Visibility {
            target_node_id,
            verb,
        } => {
            let Some(target) = target_node_id else {
                return skipped("visibility without a target node");
            };
            let Some(node) = doc.get_node(target) else {
                return skipped("visibility target does not resolve");
            };
            let next_hidden = match verb {
                VisibilityVerb::Show => false,
                VisibilityVerb::Hide => true,
                VisibilityVerb::Toggle => !node.hidden(),
            };
            let mut props = BTreeMap::new();
            props.insert("hidden".to_string(), json!(next_hidden));
            match doc.apply(Mutation::UpdateProps {
                node_id: target.clone(),
                props,
            }) {
                Ok(()) => applied(action),
                Err(err) => skipped(&err.to_string()),
            }
        }

        Action::Scroll { target_node_id } => {
            let Some(target) = target_node_id else {
                return skipped("scroll without a target node");
            };
            if doc.get_node(target).is_none() {
                return skipped("scroll target does not resolve");
            }
            effects.push(Effect::ScrollTo {
                node_id: target.clone(),
            });
            applied(action)
        }

        Action::FormSubmit { endpoint } => {
            effects.push(Effect::SubmitForm {
                endpoint: endpoint.clone(),
            });
            applied(action)
        }

        Action::Unknown(payload) => {
            tracing::warn!(
                binding = binding_id,
                payload = %payload,
                "unrecognized interaction action type; skipping"
            );
            BindingOutcome::UnknownAction {
                binding_id: binding_id.to_string(),
            }
        }
    }
}
