use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::TimeDelta;
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::modules::time_tracking::core::time_entry::TimeEntry;
use crate::modules::time_tracking::use_cases::clock_in::command::ClockIn;
use crate::modules::time_tracking::use_cases::clock_out::command::ClockOut;
use crate::modules::time_tracking::use_cases::clock_out::handler::ClockOutOutcome;
use crate::modules::time_tracking::use_cases::end_break::command::EndBreak;
use crate::modules::time_tracking::use_cases::start_break::command::StartBreak;
use crate::shell::http::router;
use crate::tests::fixtures::state::{TestContext, test_state};
use crate::tests::fixtures::{at, day};

async fn clock_in(ctx: &TestContext, id: &str) -> TimeEntry {
    let state = &ctx.state;
    state
        .clock_in_handler
        .handle(ClockIn {
            time_entry_id: id.into(),
            user_id: "user-1".into(),
            project_id: "prj-web".into(),
            job_code: "job-101".into(),
            at: state.clock.now(),
        })
        .await
        .unwrap()
}

async fn take_break(ctx: &TestContext, entry_id: &str, minutes: i64) {
    let state = &ctx.state;
    state
        .start_break_handler
        .handle(StartBreak {
            break_id: format!("b-{entry_id}"),
            user_id: "user-1".into(),
            time_entry_id: entry_id.into(),
            at: state.clock.now(),
        })
        .await
        .unwrap();
    ctx.clock.advance(TimeDelta::minutes(minutes));
    state
        .end_break_handler
        .handle(EndBreak {
            user_id: "user-1".into(),
            break_id: format!("b-{entry_id}"),
            at: state.clock.now(),
        })
        .await
        .unwrap();
}

async fn clock_out(ctx: &TestContext, id: &str) -> ClockOutOutcome {
    let state = &ctx.state;
    state
        .clock_out_handler
        .handle(ClockOut {
            user_id: "user-1".into(),
            time_entry_id: id.into(),
            at: state.clock.now(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn a_day_with_a_long_lunch_books_seven_and_three_quarter_hours() {
    let ctx = test_state();
    clock_in(&ctx, "te-1").await;
    ctx.clock.set(at(12, 0));
    take_break(&ctx, "te-1", 45).await;
    ctx.clock.set(at(17, 0));
    let outcome = clock_out(&ctx, "te-1").await;

    assert!(outcome.entry.is_complete);
    assert_eq!(outcome.daily.regular_hours, 7.75);
    assert_eq!(outcome.daily.overtime_hours, 0.0);
    assert_eq!(outcome.daily.break_time, 45.0);
    assert_eq!(outcome.weekly.total_hours, 7.75);
}

#[tokio::test]
async fn a_ten_hour_day_splits_into_regular_and_overtime() {
    let ctx = test_state();
    clock_in(&ctx, "te-1").await;
    ctx.clock.advance(TimeDelta::hours(10));
    let outcome = clock_out(&ctx, "te-1").await;

    assert_eq!(outcome.daily.regular_hours, 8.0);
    assert_eq!(outcome.daily.overtime_hours, 2.0);
    assert_eq!(outcome.daily.total_hours, 10.0);
    assert_eq!(outcome.weekly.overtime_hours, 2.0);
}

#[tokio::test]
async fn two_sessions_share_one_break_allowance_and_one_threshold() {
    let ctx = test_state();
    // 07:00-12:00 with a 20 minute break, then 13:00-18:00 with another 20
    ctx.clock.set(at(7, 0));
    clock_in(&ctx, "te-1").await;
    ctx.clock.set(at(10, 0));
    take_break(&ctx, "te-1", 20).await;
    ctx.clock.set(at(12, 0));
    clock_out(&ctx, "te-1").await;

    ctx.clock.set(at(13, 0));
    clock_in(&ctx, "te-2").await;
    ctx.clock.set(at(15, 0));
    take_break(&ctx, "te-2", 20).await;
    ctx.clock.set(at(18, 0));
    let outcome = clock_out(&ctx, "te-2").await;

    // 10h gross, 40 break minutes of which 10 are deducted
    assert!((outcome.daily.total_hours - (10.0 - 10.0 / 60.0)).abs() < 1e-9);
    assert_eq!(outcome.daily.regular_hours, 8.0);
    assert!((outcome.daily.overtime_hours - (2.0 - 10.0 / 60.0)).abs() < 1e-9);
    assert_eq!(outcome.daily.break_time, 40.0);
}

#[tokio::test]
async fn refreshing_a_day_twice_leaves_the_same_rows() {
    let ctx = test_state();
    clock_in(&ctx, "te-1").await;
    ctx.clock.advance(TimeDelta::hours(9));
    let outcome = clock_out(&ctx, "te-1").await;
    let rows_after_clock_out = ctx.store.daily_row_count().await;

    let (daily, weekly) = ctx.state.summaries.rebuild("user-1", day()).await.unwrap();
    let (again, _) = ctx.state.summaries.rebuild("user-1", day()).await.unwrap();

    assert_eq!(ctx.store.daily_row_count().await, rows_after_clock_out);
    assert_eq!(rows_after_clock_out, 1);
    assert_eq!(daily, outcome.daily);
    assert_eq!(again, daily);
    assert_eq!(weekly.total_hours, 9.0);
}

#[tokio::test]
async fn an_approved_week_keeps_its_totals_after_a_late_clock_out() {
    let ctx = test_state();
    clock_in(&ctx, "te-1").await;
    ctx.clock.advance(TimeDelta::hours(4));
    let first = clock_out(&ctx, "te-1").await;
    assert!(
        ctx.store
            .approve_weekly_report("user-1", first.weekly.week_start_date)
            .await
    );

    ctx.clock.advance(TimeDelta::hours(1));
    clock_in(&ctx, "te-2").await;
    ctx.clock.advance(TimeDelta::hours(2));
    let second = clock_out(&ctx, "te-2").await;

    assert_eq!(second.daily.total_hours, 6.0);
    assert!(second.weekly.is_approved);
    assert_eq!(second.weekly.total_hours, 4.0);
}

#[tokio::test]
async fn a_working_day_over_http() {
    let ctx = test_state();
    let app = router(ctx.state.clone());

    let response = app
        .clone()
        .oneshot(
            Request::post("/clock-in")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"user_id":"user-1","project_id":"prj-app","job_code":" job-202 "}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let entry: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let entry_id = entry["id"].as_str().unwrap().to_string();

    ctx.clock.advance(TimeDelta::minutes(90));
    let response = app
        .clone()
        .oneshot(
            Request::get("/session?user_id=user-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let session: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(session["clocked_in"], true);
    assert_eq!(session["elapsed_seconds"], 90 * 60);

    let response = app
        .oneshot(
            Request::post("/clock-out")
                .header("content-type", "application/json")
                .body(Body::from(format!(
                    r#"{{"user_id":"user-1","time_entry_id":"{entry_id}"}}"#
                )))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let outcome: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(outcome["daily"]["total_hours"], 1.5);
    assert_eq!(outcome["daily"]["rows"][0]["job_id"], "job-202");
}
