// src/application/commands/return_commands.rs
//
// Return Command Handlers
//
// RULES:
// - Accept DTOs / raw strings
// - Call services
// - Return DTOs
// - Never contain business logic

use uuid::Uuid;

use crate::application::{
    dto::{DecisionDto, ReturnDto},
    error_handling::ErrorResponse,
    state::AppState,
};
use crate::domain::{Disposition, ResalePlatform, ReturnItemInput};
use crate::services::{CreateReturnRequest, DecisionEngine, ManualOverrideRequest};

use super::{parse_id, CommandResult};

/// Run the decision engine without persisting anything
pub fn decide_item(engine: &DecisionEngine, input: ReturnItemInput) -> CommandResult<DecisionDto> {
    let decision = engine.decide_input(input)?;
    Ok(DecisionDto::from(decision))
}

/// Register a return; it stays pending until processed
pub fn create_return(state: &AppState, request: CreateReturnRequest) -> CommandResult<String> {
    let id = state.return_service.create_return(request)?;
    Ok(id.to_string())
}

/// Decide a stored return and report the updated record
pub fn process_return(state: &AppState, return_id: &str) -> CommandResult<ReturnDto> {
    let id = parse_id(return_id, "return")?;
    state.return_service.process_return(id)?;
    load_return(state, id)
}

pub fn apply_override(
    state: &AppState,
    return_id: &str,
    disposition: &str,
    platform: Option<&str>,
    note: Option<String>,
) -> CommandResult<ReturnDto> {
    let id = parse_id(return_id, "return")?;
    let disposition: Disposition = disposition.parse()?;
    let platform = platform
        .map(str::parse::<ResalePlatform>)
        .transpose()?;

    let record = state
        .return_service
        .apply_manual_override(ManualOverrideRequest {
            return_id: id,
            disposition,
            platform,
            note: note.filter(|n| !n.trim().is_empty()),
        })?;

    Ok(ReturnDto::from(record))
}

pub fn list_returns(state: &AppState) -> CommandResult<Vec<ReturnDto>> {
    let records = state.return_service.list_returns()?;
    Ok(records.into_iter().map(ReturnDto::from).collect())
}

pub fn get_return(state: &AppState, return_id: &str) -> CommandResult<ReturnDto> {
    let id = parse_id(return_id, "return")?;
    load_return(state, id)
}

pub fn delete_return(state: &AppState, return_id: &str) -> CommandResult<()> {
    let id = parse_id(return_id, "return")?;
    state.return_service.delete_return(id)?;
    Ok(())
}

fn load_return(state: &AppState, id: Uuid) -> CommandResult<ReturnDto> {
    state
        .return_service
        .get_return(id)?
        .map(ReturnDto::from)
        .ok_or_else(|| ErrorResponse::not_found("Return"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error_handling::ErrorType;
    use crate::db::create_memory_pool;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::from_pool(Arc::new(create_memory_pool().unwrap())).unwrap()
    }

    fn handbag() -> CreateReturnRequest {
        CreateReturnRequest {
            order_id: Some("ORD-1001".to_string()),
            product_id: None,
            item: ReturnItemInput {
                product_name: "Leather handbag".to_string(),
                category: "Luxury".to_string(),
                return_reason: "changed mind".to_string(),
                condition: "new".to_string(),
                notes: None,
                estimated_value: Some(450.0),
            },
        }
    }

    #[test]
    fn test_decide_item_does_not_persist() {
        let state = state();

        let decision = decide_item(&state.engine, handbag().item).unwrap();
        assert_eq!(decision.disposition, "marketplace_resale");
        assert_eq!(decision.resale.unwrap().platform, "therealreal");

        assert!(list_returns(&state).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_condition_is_validation_error() {
        let state = state();
        let mut input = handbag().item;
        input.condition = "mint".to_string();

        let err = decide_item(&state.engine, input).unwrap_err();
        assert_eq!(err.error_type, ErrorType::Validation);
    }

    #[test]
    fn test_create_then_process() {
        let state = state();
        let id = create_return(&state, handbag()).unwrap();

        let pending = get_return(&state, &id).unwrap();
        assert_eq!(pending.eligibility_status, "pending");
        assert!(pending.decision.is_none());

        let processed = process_return(&state, &id).unwrap();
        assert_eq!(processed.eligibility_status, "eligible");
        assert_eq!(
            processed.effective_disposition.as_deref(),
            Some("marketplace_resale")
        );
    }

    #[test]
    fn test_override_parses_labels() {
        let state = state();
        let id = create_return(&state, handbag()).unwrap();
        process_return(&state, &id).unwrap();

        let updated = apply_override(
            &state,
            &id,
            "marketplace",
            Some("Depop"),
            Some("vintage buyers".to_string()),
        )
        .unwrap();

        let applied = updated.manual_override.unwrap();
        assert_eq!(applied.disposition, "marketplace_resale");
        assert_eq!(applied.platform.as_deref(), Some("depop"));

        let err = apply_override(&state, &id, "recycle", None, None).unwrap_err();
        assert_eq!(err.error_type, ErrorType::Validation);
    }

    #[test]
    fn test_bad_id_and_missing_return() {
        let state = state();

        let err = get_return(&state, "not-a-uuid").unwrap_err();
        assert_eq!(err.error_type, ErrorType::Validation);

        let err = process_return(&state, &Uuid::new_v4().to_string()).unwrap_err();
        assert_eq!(err.error_type, ErrorType::NotFound);
    }

    #[test]
    fn test_delete_return() {
        let state = state();
        let id = create_return(&state, handbag()).unwrap();

        delete_return(&state, &id).unwrap();
        assert_eq!(
            get_return(&state, &id).unwrap_err().error_type,
            ErrorType::NotFound
        );
    }
}
