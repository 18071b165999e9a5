// src/services/return_service_tests.rs
//
// RETURN WORKFLOW TESTS
//
// PURPOSE:
// - Prove process_return persists the decision and derives statuses
// - Prove marketplace decisions produce exactly one open listing
// - Prove overrides keep the engine decision and re-derive statuses
// - Prove guard rails: unknown ids, double processing, unprocessed overrides
// - Prove a failed listing write never leaves a half-processed return
//
// Orchestration guards run against mockall repositories; the full workflow
// runs against an in-memory SQLite database.

#[cfg(test)]
mod guard_tests {
    use std::sync::Arc;
    use uuid::Uuid;

    use crate::domain::disposition::{
        ClassificationResult, DecisionResult, Disposition, ResalePlatform,
    };
    use crate::domain::resale::ResaleListing;
    use crate::domain::return_item::{
        ItemCategory, ItemCondition, ReturnItem, ReturnItemInput, ReturnReason, ReturnRecord,
    };
    use crate::domain::DomainError;
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::repositories::{MockResaleListingRepository, MockReturnRepository};
    use crate::services::decision_engine::DecisionEngine;
    use crate::services::return_service::{
        CreateReturnRequest, ManualOverrideRequest, ReturnService,
    };

    fn service(returns: MockReturnRepository, listings: MockResaleListingRepository) -> ReturnService {
        ReturnService::new(
            Arc::new(returns),
            Arc::new(listings),
            DecisionEngine::default(),
            Arc::new(EventBus::new()),
        )
    }

    fn processed_record() -> ReturnRecord {
        let mut record = ReturnRecord::new(
            ReturnItem::new(
                "Desk Lamp",
                ItemCategory::Home,
                ReturnReason::Defective,
                ItemCondition::Good,
            ),
            None,
            None,
        );
        record.record_decision(
            DecisionResult::new(
                ClassificationResult::new(Disposition::Outlet, 0.85, "minor defect"),
                None,
            )
            .unwrap(),
        );
        record
    }

    #[test]
    fn test_process_unknown_return_is_not_found() {
        let mut returns = MockReturnRepository::new();
        returns.expect_get_by_id().returning(|_| Ok(None));
        returns.expect_save().times(0);

        let result = service(returns, MockResaleListingRepository::new())
            .process_return(Uuid::new_v4());

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[test]
    fn test_process_twice_is_rejected_without_writes() {
        let record = processed_record();
        let mut returns = MockReturnRepository::new();
        returns
            .expect_get_by_id()
            .returning(move |_| Ok(Some(record.clone())));
        returns.expect_save().times(0);

        let mut listings = MockResaleListingRepository::new();
        listings.expect_save().times(0);

        let result = service(returns, listings).process_return(Uuid::new_v4());

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidStateTransition(_)))
        ));
    }

    fn pending_handbag() -> ReturnRecord {
        ReturnRecord::new(
            ReturnItem::new(
                "Leather Handbag",
                ItemCategory::Luxury,
                ReturnReason::ChangedMind,
                ItemCondition::Excellent,
            )
            .with_estimated_value(450.0),
            None,
            None,
        )
    }

    #[test]
    fn test_failed_listing_write_leaves_return_pending() {
        let record = pending_handbag();
        let mut returns = MockReturnRepository::new();
        returns
            .expect_get_by_id()
            .returning(move |_| Ok(Some(record.clone())));
        returns.expect_save().times(0);

        let mut listings = MockResaleListingRepository::new();
        listings.expect_list_by_return_item().returning(|_| Ok(Vec::new()));
        listings
            .expect_save()
            .times(1)
            .returning(|_| Err(AppError::Other("disk full".to_string())));

        let result = service(returns, listings).process_return(Uuid::new_v4());

        assert!(matches!(result, Err(AppError::Other(_))));
    }

    #[test]
    fn test_retry_reuses_listing_from_failed_attempt() {
        let record = pending_handbag();
        let orphan = ResaleListing::new(
            record.id,
            "Leather Handbag".to_string(),
            ResalePlatform::TheRealReal,
            450.0,
        );

        let mut returns = MockReturnRepository::new();
        returns
            .expect_get_by_id()
            .returning(move |_| Ok(Some(record.clone())));
        returns.expect_save().times(1).returning(|_| Ok(()));

        let mut listings = MockResaleListingRepository::new();
        listings
            .expect_list_by_return_item()
            .returning(move |_| Ok(vec![orphan.clone()]));
        listings.expect_save().times(0);

        let decision = service(returns, listings)
            .process_return(Uuid::new_v4())
            .unwrap();

        assert_eq!(decision.disposition(), Disposition::MarketplaceResale);
    }

    #[test]
    fn test_failed_override_listing_write_keeps_previous_decision() {
        let record = processed_record();
        let mut returns = MockReturnRepository::new();
        returns
            .expect_get_by_id()
            .returning(move |_| Ok(Some(record.clone())));
        returns.expect_save().times(0);

        let mut listings = MockResaleListingRepository::new();
        listings.expect_list_by_return_item().returning(|_| Ok(Vec::new()));
        listings
            .expect_save()
            .returning(|_| Err(AppError::Other("disk full".to_string())));

        let result = service(returns, listings).apply_manual_override(ManualOverrideRequest {
            return_id: Uuid::new_v4(),
            disposition: Disposition::MarketplaceResale,
            platform: Some(ResalePlatform::EBay),
            note: None,
        });

        assert!(matches!(result, Err(AppError::Other(_))));
    }

    #[test]
    fn test_unknown_condition_is_never_stored() {
        let mut returns = MockReturnRepository::new();
        returns.expect_save().times(0);

        let request = CreateReturnRequest {
            item: ReturnItemInput {
                product_name: "Watch".to_string(),
                category: "Accessories".to_string(),
                return_reason: "Changed mind".to_string(),
                condition: "mint".to_string(),
                notes: None,
                estimated_value: Some(300.0),
            },
            ..Default::default()
        };

        let result = service(returns, MockResaleListingRepository::new()).create_return(request);

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_override_of_unprocessed_return_is_rejected() {
        let record = ReturnRecord::new(
            ReturnItem::new(
                "Desk Lamp",
                ItemCategory::Home,
                ReturnReason::Defective,
                ItemCondition::Good,
            ),
            None,
            None,
        );
        let mut returns = MockReturnRepository::new();
        returns
            .expect_get_by_id()
            .returning(move |_| Ok(Some(record.clone())));
        returns.expect_save().times(0);

        let result = service(returns, MockResaleListingRepository::new()).apply_manual_override(
            ManualOverrideRequest {
                return_id: Uuid::new_v4(),
                disposition: Disposition::Donate,
                platform: None,
                note: None,
            },
        );

        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidStateTransition(_)))
        ));
    }

    #[test]
    fn test_delete_missing_return_propagates_not_found() {
        let mut returns = MockReturnRepository::new();
        returns
            .expect_delete()
            .returning(|_| Err(AppError::NotFound));

        let result = service(returns, MockResaleListingRepository::new()).delete_return(Uuid::new_v4());

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}

#[cfg(test)]
mod workflow_tests {
    use std::sync::{Arc, Mutex};

    use crate::db::{create_memory_pool, initialize_database};
    use crate::domain::disposition::{Disposition, ResalePlatform};
    use crate::domain::resale::ListingStatus;
    use crate::domain::return_item::{EligibilityStatus, RefundStatus, ReturnItemInput};
    use crate::error::AppResult;
    use crate::events::{
        register_review_notification_handlers, DomainEvent, EventBus, ManualOverrideApplied,
        ResaleListingCreated, ResaleListingSold, ResaleListingWithdrawn, ReturnFlaggedForReview,
        ReturnItemCreated, ReturnItemDeleted, ReturnProcessed, ReviewNotice, ReviewNoticeKind,
        ReviewNotifier,
    };
    use crate::repositories::{SqliteResaleListingRepository, SqliteReturnRepository};
    use crate::services::analytics_service::AnalyticsService;
    use crate::services::decision_engine::DecisionEngine;
    use crate::services::resale_service::ResaleService;
    use crate::services::return_service::{
        CreateReturnRequest, ManualOverrideRequest, ReturnService,
    };

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<ReviewNotice>>,
    }

    impl ReviewNotifier for RecordingNotifier {
        fn notify(&self, notice: &ReviewNotice) -> AppResult<()> {
            self.notices.lock().unwrap().push(notice.clone());
            Ok(())
        }
    }

    struct Fixture {
        returns: ReturnService,
        resale: ResaleService,
        analytics: AnalyticsService,
        emitted: Arc<Mutex<Vec<String>>>,
        notifier: Arc<RecordingNotifier>,
    }

    fn record<E: DomainEvent + 'static>(bus: &EventBus, emitted: &Arc<Mutex<Vec<String>>>) {
        let emitted = Arc::clone(emitted);
        bus.subscribe::<E, _>(move |event| {
            emitted.lock().unwrap().push(event.event_type().to_string());
        });
    }

    fn record_all(bus: &EventBus) -> Arc<Mutex<Vec<String>>> {
        let emitted = Arc::new(Mutex::new(Vec::new()));
        record::<ReturnItemCreated>(bus, &emitted);
        record::<ReturnProcessed>(bus, &emitted);
        record::<ReturnFlaggedForReview>(bus, &emitted);
        record::<ManualOverrideApplied>(bus, &emitted);
        record::<ReturnItemDeleted>(bus, &emitted);
        record::<ResaleListingCreated>(bus, &emitted);
        record::<ResaleListingSold>(bus, &emitted);
        record::<ResaleListingWithdrawn>(bus, &emitted);
        emitted
    }

    fn fixture() -> Fixture {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();

        let return_repo = Arc::new(SqliteReturnRepository::new(Arc::clone(&pool)));
        let listing_repo = Arc::new(SqliteResaleListingRepository::new(pool));
        let bus = Arc::new(EventBus::new());
        let notifier = Arc::new(RecordingNotifier::default());
        register_review_notification_handlers(&bus, notifier.clone());
        let emitted = record_all(&bus);

        Fixture {
            returns: ReturnService::new(
                return_repo.clone(),
                listing_repo.clone(),
                DecisionEngine::default(),
                Arc::clone(&bus),
            ),
            resale: ResaleService::new(listing_repo.clone(), Arc::clone(&bus)),
            analytics: AnalyticsService::new(return_repo, listing_repo),
            emitted,
            notifier,
        }
    }

    fn request(
        name: &str,
        category: &str,
        reason: &str,
        condition: &str,
        notes: Option<&str>,
        value: f64,
    ) -> CreateReturnRequest {
        CreateReturnRequest {
            order_id: Some("ORD-2001".to_string()),
            product_id: None,
            item: ReturnItemInput {
                product_name: name.to_string(),
                category: category.to_string(),
                return_reason: reason.to_string(),
                condition: condition.to_string(),
                notes: notes.map(str::to_string),
                estimated_value: Some(value),
            },
        }
    }

    fn handbag() -> CreateReturnRequest {
        request("Leather Handbag", "Luxury", "Changed mind", "excellent", None, 450.0)
    }

    fn sweater() -> CreateReturnRequest {
        request("Wool Sweater", "Apparel", "Changed mind", "excellent", None, 90.0)
    }

    fn event_types(f: &Fixture) -> Vec<String> {
        f.emitted.lock().unwrap().clone()
    }

    #[test]
    fn test_intake_stores_pending_return() {
        let f = fixture();
        let id = f.returns.create_return(handbag()).unwrap();

        let record = f.returns.get_return(id).unwrap().unwrap();
        assert_eq!(record.eligibility_status, EligibilityStatus::Pending);
        assert_eq!(record.refund_status, RefundStatus::Pending);
        assert!(record.decision.is_none());
        assert_eq!(event_types(&f), vec!["ReturnItemCreated"]);
    }

    #[test]
    fn test_marketplace_decision_creates_listing() {
        let f = fixture();
        let id = f.returns.create_return(handbag()).unwrap();

        let decision = f.returns.process_return(id).unwrap();
        assert_eq!(decision.disposition(), Disposition::MarketplaceResale);

        let record = f.returns.get_return(id).unwrap().unwrap();
        assert_eq!(record.decision, Some(decision));
        assert_eq!(record.eligibility_status, EligibilityStatus::Eligible);
        assert_eq!(record.refund_status, RefundStatus::Processed);

        let listings = f.resale.listings_for_return(id).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].platform, ResalePlatform::TheRealReal);
        assert_eq!(listings[0].listing_price, 450.0);
        assert_eq!(listings[0].status, ListingStatus::Listed);

        assert_eq!(
            event_types(&f),
            vec!["ReturnItemCreated", "ReturnProcessed", "ResaleListingCreated"]
        );
    }

    #[test]
    fn test_manual_review_is_flagged_and_notified() {
        let f = fixture();
        let id = f.returns.create_return(sweater()).unwrap();

        let decision = f.returns.process_return(id).unwrap();
        assert_eq!(decision.disposition(), Disposition::ManualReview);

        let record = f.returns.get_return(id).unwrap().unwrap();
        assert_eq!(record.eligibility_status, EligibilityStatus::Flagged);
        assert_eq!(record.refund_status, RefundStatus::Pending);
        assert!(f.resale.listings_for_return(id).unwrap().is_empty());

        let notices = f.notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, ReviewNoticeKind::FlaggedForReview);
        assert_eq!(notices[0].return_id, id);
    }

    #[test]
    fn test_discard_is_flagged_without_listing() {
        let f = fixture();
        let id = f
            .returns
            .create_return(request(
                "Running Shoes",
                "Footwear",
                "Wrong size",
                "new",
                Some("Small tear on the heel"),
                110.0,
            ))
            .unwrap();

        let decision = f.returns.process_return(id).unwrap();
        assert_eq!(decision.disposition(), Disposition::Discard);

        let record = f.returns.get_return(id).unwrap().unwrap();
        assert_eq!(record.eligibility_status, EligibilityStatus::Flagged);
        assert!(f.resale.list_listings().unwrap().is_empty());
    }

    #[test]
    fn test_override_to_donate_rederives_statuses() {
        let f = fixture();
        let id = f.returns.create_return(sweater()).unwrap();
        f.returns.process_return(id).unwrap();

        let record = f
            .returns
            .apply_manual_override(ManualOverrideRequest {
                return_id: id,
                disposition: Disposition::Donate,
                platform: None,
                note: Some("local shelter".to_string()),
            })
            .unwrap();

        assert_eq!(record.effective_disposition(), Some(Disposition::Donate));
        assert_eq!(record.eligibility_status, EligibilityStatus::Eligible);
        assert_eq!(record.refund_status, RefundStatus::Processed);

        let stored = f.returns.get_return(id).unwrap().unwrap();
        assert_eq!(
            stored.decision.unwrap().disposition(),
            Disposition::ManualReview
        );
        assert_eq!(
            stored.manual_override.unwrap().note.as_deref(),
            Some("local shelter")
        );

        let notices = f.notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[1].kind, ReviewNoticeKind::ManualOverride);
    }

    #[test]
    fn test_override_to_marketplace_uses_router_when_no_platform() {
        let f = fixture();
        let id = f.returns.create_return(sweater()).unwrap();
        f.returns.process_return(id).unwrap();

        let record = f
            .returns
            .apply_manual_override(ManualOverrideRequest {
                return_id: id,
                disposition: Disposition::MarketplaceResale,
                platform: None,
                note: None,
            })
            .unwrap();

        // Excellent apparel goes to Poshmark
        assert_eq!(record.effective_platform(), Some(ResalePlatform::Poshmark));

        let listings = f.resale.listings_for_return(id).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].platform, ResalePlatform::Poshmark);
        assert_eq!(listings[0].listing_price, 90.0);
    }

    #[test]
    fn test_override_away_from_marketplace_withdraws_listing() {
        let f = fixture();
        let id = f.returns.create_return(handbag()).unwrap();
        f.returns.process_return(id).unwrap();

        f.returns
            .apply_manual_override(ManualOverrideRequest {
                return_id: id,
                disposition: Disposition::Relist,
                platform: None,
                note: None,
            })
            .unwrap();

        let listings = f.resale.listings_for_return(id).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].status, ListingStatus::Withdrawn);
        assert!(event_types(&f).contains(&"ResaleListingWithdrawn".to_string()));
    }

    #[test]
    fn test_override_on_same_platform_keeps_listing() {
        let f = fixture();
        let id = f.returns.create_return(handbag()).unwrap();
        f.returns.process_return(id).unwrap();

        f.returns
            .apply_manual_override(ManualOverrideRequest {
                return_id: id,
                disposition: Disposition::MarketplaceResale,
                platform: Some(ResalePlatform::TheRealReal),
                note: None,
            })
            .unwrap();

        let listings = f.resale.listings_for_return(id).unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].status, ListingStatus::Listed);
    }

    #[test]
    fn test_sale_flows_into_analytics() {
        let f = fixture();
        let bag = f.returns.create_return(handbag()).unwrap();
        let knit = f.returns.create_return(sweater()).unwrap();
        let _pending = f
            .returns
            .create_return(request("Desk Lamp", "Home", "Defective", "good", None, 80.0))
            .unwrap();

        f.returns.process_return(bag).unwrap();
        f.returns.process_return(knit).unwrap();

        let listing = f.resale.listings_for_return(bag).unwrap().remove(0);
        let sold = f.resale.mark_sold(listing.id, 480.0).unwrap();
        assert_eq!(sold.profit_margin(), Some(30.0));
        assert!(f.resale.mark_sold(listing.id, 500.0).is_err());

        let report = f.analytics.compute().unwrap();
        assert_eq!(report.total_returns, 3);
        assert_eq!(report.pending_classification, 1);
        assert_eq!(report.eligible_returns, 1);
        assert_eq!(report.flagged_returns, 1);
        assert_eq!(report.total_refunded_amount, 450.0);
        assert_eq!(report.total_recovered_revenue, 480.0);
        assert_eq!(report.disposition_breakdown.get("marketplace_resale"), Some(&1));
        assert_eq!(report.disposition_breakdown.get("manual_review"), Some(&1));
        assert_eq!(report.disposition_breakdown.get("pending"), Some(&1));
        assert_eq!(report.platform_performance.len(), 1);
        assert_eq!(report.platform_performance[0].sold, 1);
    }

    #[test]
    fn test_delete_removes_listings() {
        let f = fixture();
        let id = f.returns.create_return(handbag()).unwrap();
        f.returns.process_return(id).unwrap();

        f.returns.delete_return(id).unwrap();

        assert!(f.returns.get_return(id).unwrap().is_none());
        assert!(f.resale.list_listings().unwrap().is_empty());
        assert!(f.returns.delete_return(id).is_err());
    }
}
