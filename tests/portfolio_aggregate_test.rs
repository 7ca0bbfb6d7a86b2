//! Integration tests for the portfolio aggregate repository, driven by
//! SeaORM's mock database.
//!
//! The mock records every statement it receives, so these tests assert the
//! repository's observable storage behavior: which queries run, which rows
//! get deleted, and that reconciliation updates rows in place instead of
//! recreating them. No running database is needed.
//!
//! Run with: `cargo test --test portfolio_aggregate_test`

use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Transaction};
use uuid::Uuid;

use soloflow_backend::db::portfolio::{
    SavePortfolioError, delete_portfolio, fetch_portfolio, save_portfolio,
};
use soloflow_backend::models::contact::ContactData;
use soloflow_backend::models::portfolio::PortfolioDetail;
use soloflow_backend::models::project::ProjectData;
use soloflow_backend::models::skill::SkillData;
use soloflow_backend::models::social_link::SocialLinkData;
use soloflow_backend::models::team_member::TeamMemberData;
use soloflow_backend::models::{
    contact, experience, member_link, portfolio, project, service, skill, social_link, team_member,
    testimonial,
};

fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

fn exec_ok() -> MockExecResult {
    MockExecResult {
        rows_affected: 1,
        ..Default::default()
    }
}

/// Render every logged statement to one string per statement for
/// substring assertions.
fn logged_statements(db: DatabaseConnection) -> Vec<String> {
    db.into_transaction_log()
        .iter()
        .map(|txn: &Transaction| format!("{txn:?}"))
        .collect()
}

fn portfolio_row(id: Uuid, user_id: Uuid) -> portfolio::Model {
    portfolio::Model {
        id,
        user_id,
        name: "Ada Lovelace".to_string(),
        title: "Freelance Engineer".to_string(),
        subtitle: Some("Systems & analysis".to_string()),
        bio: None,
        theme: "midnight".to_string(),
        layout: "classic".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn contact_row(id: Uuid, portfolio_id: Uuid) -> contact::Model {
    contact::Model {
        id,
        portfolio_id,
        email: "ada@example.com".to_string(),
        phone: None,
        location: Some("London".to_string()),
        linkedin_url: None,
        github_url: None,
        website_url: None,
        updated_at: Utc::now(),
    }
}

fn project_row(id: Uuid, portfolio_id: Uuid, title: &str) -> project::Model {
    project::Model {
        id,
        portfolio_id,
        title: title.to_string(),
        description: "A project".to_string(),
        technologies: serde_json::json!(["rust", "postgres"]),
        image_url: None,
        link_url: None,
        is_featured: false,
        updated_at: Utc::now(),
    }
}

fn skill_row(id: Uuid, portfolio_id: Uuid, name: &str) -> skill::Model {
    skill::Model {
        id,
        portfolio_id,
        name: name.to_string(),
        level: 80,
        category: "backend".to_string(),
        updated_at: Utc::now(),
    }
}

fn member_row(id: Uuid, portfolio_id: Uuid, name: &str) -> team_member::Model {
    team_member::Model {
        id,
        portfolio_id,
        name: name.to_string(),
        role: "Engineer".to_string(),
        bio: None,
        email: None,
        avatar_url: None,
        updated_at: Utc::now(),
    }
}

fn member_link_row(id: Uuid, team_member_id: Uuid, platform: &str) -> member_link::Model {
    member_link::Model {
        id,
        team_member_id,
        platform: platform.to_string(),
        url: format!("https://{platform}.example.com/profile"),
        icon: None,
        updated_at: Utc::now(),
    }
}

fn social_link_row(id: Uuid, portfolio_id: Uuid, platform: &str) -> social_link::Model {
    social_link::Model {
        id,
        portfolio_id,
        platform: platform.to_string(),
        url: format!("https://{platform}.example.com/studio"),
        icon: None,
        updated_at: Utc::now(),
    }
}

fn project_data(id: Uuid, title: &str) -> ProjectData {
    ProjectData {
        id,
        title: title.to_string(),
        description: "A project".to_string(),
        technologies: vec!["rust".to_string(), "postgres".to_string()],
        image_url: None,
        link_url: None,
        featured: false,
    }
}

fn link_data(id: Uuid, platform: &str) -> SocialLinkData {
    SocialLinkData {
        id,
        platform: platform.to_string(),
        url: format!("https://{platform}.example.com/profile"),
        icon: None,
    }
}

/// A save payload with every collection empty, for tests that only care
/// about a subset.
fn bare_detail(id: Uuid, user_id: Uuid) -> PortfolioDetail {
    PortfolioDetail {
        id: Some(id),
        user_id,
        name: "Ada Lovelace".to_string(),
        title: "Freelance Engineer".to_string(),
        subtitle: None,
        bio: None,
        theme: "midnight".to_string(),
        layout: "classic".to_string(),
        contact: None,
        projects: vec![],
        experiences: vec![],
        skills: vec![],
        services: vec![],
        testimonials: vec![],
        team_members: vec![],
        social_links: vec![],
    }
}

#[tokio::test]
async fn fetch_returns_every_collection_with_member_scoped_links() {
    let pid = Uuid::new_v4();
    let uid = Uuid::new_v4();
    let (m1, m2) = (Uuid::new_v4(), Uuid::new_v4());
    let (p1, p2) = (Uuid::new_v4(), Uuid::new_v4());
    let (s1, s2, s3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let (ml1, ml2, ml3) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    // Result sets are consumed in the repository's fetch order: root,
    // contact, then the seven flat collections, then one link query per
    // member.
    let db = mock_db()
        .append_query_results([vec![portfolio_row(pid, uid)]])
        .append_query_results([Vec::<contact::Model>::new()])
        .append_query_results([vec![
            project_row(p1, pid, "Engine"),
            project_row(p2, pid, "Notes"),
        ]])
        .append_query_results([Vec::<experience::Model>::new()])
        .append_query_results([vec![
            skill_row(s1, pid, "Rust"),
            skill_row(s2, pid, "SQL"),
            skill_row(s3, pid, "Actix"),
        ]])
        .append_query_results([Vec::<service::Model>::new()])
        .append_query_results([Vec::<testimonial::Model>::new()])
        .append_query_results([vec![member_row(m1, pid, "Grace"), member_row(m2, pid, "Alan")]])
        .append_query_results([vec![social_link_row(Uuid::new_v4(), pid, "github")]])
        .append_query_results([vec![
            member_link_row(ml1, m1, "github"),
            member_link_row(ml2, m1, "linkedin"),
        ]])
        .append_query_results([vec![member_link_row(ml3, m2, "github")]])
        .into_connection();

    let detail = fetch_portfolio(&db, pid)
        .await
        .expect("fetch should succeed")
        .expect("portfolio should exist");

    assert_eq!(detail.id, Some(pid));
    assert_eq!(detail.projects.len(), 2);
    assert_eq!(detail.skills.len(), 3);
    assert_eq!(detail.team_members.len(), 2);

    // Missing contact row becomes the default contact, not an error.
    let contact = detail.contact.as_ref().expect("contact is always present");
    assert_eq!(contact.email, "");
    assert!(contact.id.is_none());

    // Each member holds exactly its own links.
    let grace = &detail.team_members[0];
    let alan = &detail.team_members[1];
    assert_eq!(grace.social_links.len(), 2);
    assert_eq!(alan.social_links.len(), 1);
    assert!(grace.social_links.iter().all(|l| l.id == ml1 || l.id == ml2));
    assert_eq!(alan.social_links[0].id, ml3);

    // Storage names are mapped to the public camelCase shape.
    let json = serde_json::to_value(&detail).expect("serializes");
    assert!(json["projects"][0].get("featured").is_some());
    assert!(json["projects"][0].get("is_featured").is_none());
    assert!(json["teamMembers"].is_array());
}

#[tokio::test]
async fn fetch_missing_root_short_circuits() {
    let db = mock_db()
        .append_query_results([Vec::<portfolio::Model>::new()])
        .into_connection();

    let result = fetch_portfolio(&db, Uuid::new_v4())
        .await
        .expect("fetch should succeed");
    assert!(result.is_none());

    // Only the root lookup ran; no child queries were issued.
    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1);
}

#[tokio::test]
async fn round_trip_save_reissues_no_deletes() {
    let pid = Uuid::new_v4();
    let uid = Uuid::new_v4();
    let cid = Uuid::new_v4();
    let (p1, s1, m1, ml1, sl1) = (
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
    );

    let db = mock_db()
        // fetch: root, contact, seven collections, one member's links
        .append_query_results([vec![portfolio_row(pid, uid)]])
        .append_query_results([vec![contact_row(cid, pid)]])
        .append_query_results([vec![project_row(p1, pid, "Engine")]])
        .append_query_results([Vec::<experience::Model>::new()])
        .append_query_results([vec![skill_row(s1, pid, "Rust")]])
        .append_query_results([Vec::<service::Model>::new()])
        .append_query_results([Vec::<testimonial::Model>::new()])
        .append_query_results([vec![member_row(m1, pid, "Grace")]])
        .append_query_results([vec![social_link_row(sl1, pid, "github")]])
        .append_query_results([vec![member_link_row(ml1, m1, "github")]])
        // save: existing-id queries for projects, skills, members, the
        // member's links, and social links — same rows as stored
        .append_query_results([vec![project_row(p1, pid, "Engine")]])
        .append_query_results([vec![skill_row(s1, pid, "Rust")]])
        .append_query_results([vec![member_row(m1, pid, "Grace")]])
        .append_query_results([vec![member_link_row(ml1, m1, "github")]])
        .append_query_results([vec![social_link_row(sl1, pid, "github")]])
        // save: root, contact, project, skill, member, member link, social
        // link upserts
        .append_exec_results([
            exec_ok(),
            exec_ok(),
            exec_ok(),
            exec_ok(),
            exec_ok(),
            exec_ok(),
            exec_ok(),
        ])
        .into_connection();

    let detail = fetch_portfolio(&db, pid)
        .await
        .expect("fetch should succeed")
        .expect("portfolio should exist");

    let saved_id = save_portfolio(&db, detail)
        .await
        .expect("round-trip save should succeed");
    assert_eq!(saved_id, pid);

    let stmts = logged_statements(db);
    assert!(
        stmts.iter().all(|s| !s.contains("DELETE")),
        "an unchanged save must not delete anything"
    );
    // Every collection row was written back in place.
    let upserts = stmts.iter().filter(|s| s.contains("ON CONFLICT")).count();
    assert_eq!(upserts, 7);
}

#[tokio::test]
async fn save_deletes_only_rows_missing_from_incoming_set() {
    let pid = Uuid::new_v4();
    let uid = Uuid::new_v4();
    let (a, b, c, d) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

    let db = mock_db()
        // existing project ids for this portfolio: {a, b, c}
        .append_query_results([vec![
            project_row(a, pid, "Keep A"),
            project_row(b, pid, "Drop B"),
            project_row(c, pid, "Keep C"),
        ]])
        // root upsert, batch delete, three project upserts
        .append_exec_results([exec_ok(), exec_ok(), exec_ok(), exec_ok(), exec_ok()])
        .into_connection();

    let mut detail = bare_detail(pid, uid);
    detail.projects = vec![
        project_data(a, "Keep A"),
        project_data(c, "Keep C"),
        project_data(d, "New D"),
    ];

    let saved_id = save_portfolio(&db, detail).await.expect("save succeeds");
    assert_eq!(saved_id, pid);

    let stmts = logged_statements(db);
    let deletes: Vec<&String> = stmts.iter().filter(|s| s.contains("DELETE")).collect();
    assert_eq!(deletes.len(), 1, "exactly one batch delete");
    assert!(deletes[0].contains(&b.to_string()), "b is deleted");
    assert!(!deletes[0].contains(&a.to_string()), "a survives");
    assert!(!deletes[0].contains(&c.to_string()), "c survives");
    assert!(!deletes[0].contains(&d.to_string()), "d is new, not deleted");

    // a, c, d are all upserted in place (insert-or-update, not
    // delete-then-insert).
    let project_upserts = stmts
        .iter()
        .filter(|s| s.contains("portfolio_projects") && s.contains("ON CONFLICT"))
        .count();
    assert_eq!(project_upserts, 3);
}

#[tokio::test]
async fn save_skips_reconcile_for_empty_collections() {
    let pid = Uuid::new_v4();
    let uid = Uuid::new_v4();

    let db = mock_db()
        // only the root upsert should reach the database
        .append_exec_results([exec_ok()])
        .into_connection();

    // Every child collection is empty: stored rows, if any, stay untouched.
    let detail = bare_detail(pid, uid);
    save_portfolio(&db, detail).await.expect("save succeeds");

    let stmts = logged_statements(db);
    assert_eq!(stmts.len(), 1, "no existing-id query, no delete");
    assert!(stmts[0].contains("portfolios"));
    assert!(
        stmts.iter().all(|s| !s.contains("portfolio_skills")),
        "an emptied collection is not reconciled"
    );
}

#[tokio::test]
async fn save_rejects_blank_title_before_any_statement() {
    let pid = Uuid::new_v4();
    let uid = Uuid::new_v4();

    let db = mock_db().into_connection();

    let mut detail = bare_detail(pid, uid);
    detail.title = "   ".to_string();

    let err = save_portfolio(&db, detail)
        .await
        .expect_err("blank title must be rejected");
    assert!(matches!(err, SavePortfolioError::TitleRequired));

    let log = db.into_transaction_log();
    assert!(log.is_empty(), "validation failures never reach the store");
}

#[tokio::test]
async fn member_link_diff_is_scoped_per_member() {
    let pid = Uuid::new_v4();
    let uid = Uuid::new_v4();
    let (ma, mb) = (Uuid::new_v4(), Uuid::new_v4());
    let (la, lb) = (Uuid::new_v4(), Uuid::new_v4());

    let db = mock_db()
        // existing members {a, b}
        .append_query_results([vec![member_row(ma, pid, "Grace"), member_row(mb, pid, "Alan")]])
        // existing links for member a, then member b
        .append_query_results([vec![member_link_row(la, ma, "github")]])
        .append_query_results([vec![member_link_row(lb, mb, "github")]])
        // root, member a, link a, member b, link b upserts
        .append_exec_results([exec_ok(), exec_ok(), exec_ok(), exec_ok(), exec_ok()])
        .into_connection();

    // Both members carry a link with identical platform/url but distinct
    // ids; neither may be treated as stale by the other's diff.
    let mut detail = bare_detail(pid, uid);
    detail.team_members = vec![
        TeamMemberData {
            id: ma,
            name: "Grace".to_string(),
            role: "Engineer".to_string(),
            bio: None,
            email: None,
            avatar_url: None,
            social_links: vec![link_data(la, "github")],
        },
        TeamMemberData {
            id: mb,
            name: "Alan".to_string(),
            role: "Engineer".to_string(),
            bio: None,
            email: None,
            avatar_url: None,
            social_links: vec![link_data(lb, "github")],
        },
    ];

    save_portfolio(&db, detail).await.expect("save succeeds");

    let stmts = logged_statements(db);
    assert!(
        stmts.iter().all(|s| !s.contains("DELETE")),
        "colliding platform/url across members must not trigger deletes"
    );
}

#[tokio::test]
async fn delete_issues_single_root_statement() {
    let pid = Uuid::new_v4();

    let db = mock_db()
        .append_exec_results([MockExecResult {
            rows_affected: 1,
            ..Default::default()
        }])
        .into_connection();

    let result = delete_portfolio(&db, pid).await.expect("delete succeeds");
    assert_eq!(result.rows_affected, 1);

    // Child cleanup belongs to the schema's cascading foreign keys; the
    // repository touches only the root table.
    let stmts = logged_statements(db);
    assert_eq!(stmts.len(), 1);
    assert!(stmts[0].contains("portfolios"));
    for child_table in [
        "portfolio_contacts",
        "portfolio_projects",
        "portfolio_experiences",
        "portfolio_skills",
        "portfolio_services",
        "portfolio_testimonials",
        "team_members",
        "team_member_social_links",
        "portfolio_social_links",
    ] {
        assert!(
            !stmts[0].contains(child_table),
            "no explicit delete against {child_table}"
        );
    }
}

#[tokio::test]
async fn save_upserts_contact_keyed_by_own_id() {
    let pid = Uuid::new_v4();
    let uid = Uuid::new_v4();
    let cid = Uuid::new_v4();

    let db = mock_db()
        // root and contact upserts
        .append_exec_results([exec_ok(), exec_ok()])
        .into_connection();

    let mut detail = bare_detail(pid, uid);
    detail.contact = Some(ContactData {
        id: Some(cid),
        email: "ada@example.com".to_string(),
        phone: None,
        location: None,
        linkedin_url: None,
        github_url: None,
        website_url: None,
    });

    save_portfolio(&db, detail).await.expect("save succeeds");

    let stmts = logged_statements(db);
    assert_eq!(stmts.len(), 2);
    assert!(stmts[1].contains("portfolio_contacts"));
    assert!(stmts[1].contains(&cid.to_string()), "keyed by the contact id");
    assert!(stmts[1].contains(&pid.to_string()), "stamped with portfolio id");
}

#[tokio::test]
async fn save_generates_root_id_when_absent() {
    let uid = Uuid::new_v4();

    let db = mock_db().append_exec_results([exec_ok()]).into_connection();

    let mut detail = bare_detail(Uuid::new_v4(), uid);
    detail.id = None;

    let new_id = save_portfolio(&db, detail).await.expect("save succeeds");

    let stmts = logged_statements(db);
    assert_eq!(stmts.len(), 1);
    assert!(
        stmts[0].contains(&new_id.to_string()),
        "client-generated id is used for the insert"
    );
}

#[tokio::test]
async fn skill_collection_reconciles_like_projects() {
    // Guard the diff behavior on a second collection type to catch a
    // copy-paste slip in a per-collection routine.
    let pid = Uuid::new_v4();
    let uid = Uuid::new_v4();
    let (keep, stale) = (Uuid::new_v4(), Uuid::new_v4());

    let db = mock_db()
        .append_query_results([vec![
            skill_row(keep, pid, "Rust"),
            skill_row(stale, pid, "Cobol"),
        ]])
        // root upsert, skill delete, skill upsert
        .append_exec_results([exec_ok(), exec_ok(), exec_ok()])
        .into_connection();

    let mut detail = bare_detail(pid, uid);
    detail.skills = vec![SkillData {
        id: keep,
        name: "Rust".to_string(),
        level: 95,
        category: "backend".to_string(),
    }];

    save_portfolio(&db, detail).await.expect("save succeeds");

    let stmts = logged_statements(db);
    let deletes: Vec<&String> = stmts.iter().filter(|s| s.contains("DELETE")).collect();
    assert_eq!(deletes.len(), 1);
    assert!(deletes[0].contains("portfolio_skills"));
    assert!(deletes[0].contains(&stale.to_string()));
    assert!(!deletes[0].contains(&keep.to_string()));
}
