//! End-to-end tests over the demo town file

use budgetville::{
    BalanceLedger, Direction, Director, EngineConfig, FlagStore, Position, Status, Suspension,
    TalkingEntry, WalkableActor,
    cli::run_lint,
    error::StoreError,
    lint::check_entries,
    storage::{JsonFlagStore, JsonProgressRepository, MemoryFlagStore, Progress, ProgressRepository},
    town::{TownData, World},
};
use std::path::PathBuf;
use tempfile::TempDir;

fn demo_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/town.json")
}

fn demo_town() -> TownData {
    TownData::load(demo_path()).expect("Failed to load demo town")
}

fn instant_text() -> EngineConfig {
    EngineConfig {
        text_speed: usize::MAX,
        ..EngineConfig::default()
    }
}

fn banker_entries(town: &TownData) -> Vec<TalkingEntry> {
    town.talking("Banker").expect("banker exists").to_vec()
}

/// Tick frames into the director until the walk it waits on returns
fn finish_walk(director: &mut Director, token: budgetville::SessionToken, world: &mut World) -> Status {
    for _ in 0..1_000 {
        let completions = world.tick(16.0);
        if let Some(completion) = completions.into_iter().next() {
            return director
                .walk_finished(token, completion, &mut world.host())
                .expect("walk finished");
        }
    }
    panic!("walk never completed");
}

#[test]
fn demo_town_loads() {
    let town = demo_town();

    assert_eq!(town.map, "World");
    assert_eq!(town.balance, 20.0);
    assert_eq!(town.actor_names(), vec!["Player", "Banker", "Shopkeeper"]);
    assert_eq!(banker_entries(&town).len(), 3);
    assert_eq!(town.npc("Shopkeeper").map(|npc| npc.direction), Some(Direction::Down));
}

#[test]
fn demo_town_lints_clean() {
    let town = demo_town();
    let actors = town.actor_names();

    for npc in &town.npcs {
        let diagnostics = check_entries(&npc.name, &npc.talking, &actors);
        assert!(diagnostics.is_empty(), "{}: {:?}", npc.name, diagnostics);
    }
    assert!(!run_lint(&demo_path()).expect("lint runs"));
}

#[test]
fn banker_story_over_three_visits() {
    let town = demo_town();
    let config = instant_text();
    let entries = banker_entries(&town);
    let mut world = town.build_world(Box::new(MemoryFlagStore::new()), &config);
    let mut director = Director::new(config);

    // First visit: greeting and a budgeting question
    let (token, status) = director
        .begin("Banker", "Player", &entries, &mut world.host())
        .expect("first visit");
    assert_eq!(status, Status::Paused(Suspension::AwaitingConfirm));
    let banker = world.cast.get("Banker").expect("banker placed");
    assert_eq!(banker.direction(), Direction::Down);

    let status = director.confirm(token, &mut world.host()).expect("confirm");
    assert_eq!(status, Status::Paused(Suspension::AwaitingChoice));
    assert!(world.flags.contains("metBanker"));

    let status = director.choose(token, 0, &mut world.host()).expect("choose");
    assert_eq!(status, Status::Paused(Suspension::AwaitingConfirm));
    assert_eq!(
        world.screen.current_text(),
        Some("A wise saver. Talk to me again about an account.")
    );

    let status = director.confirm(token, &mut world.host()).expect("confirm");
    assert_eq!(status, Status::Finished);
    assert!(!world.flags.contains("keepsBudget"));

    // Second visit: walk to the vault and pay the fee
    let (token, status) = director
        .begin("Banker", "Player", &entries, &mut world.host())
        .expect("second visit");
    assert_eq!(director.active_selection().map(|s| s.index()), Some(1));
    assert_eq!(status, Status::Paused(Suspension::AwaitingConfirm));

    let status = director.confirm(token, &mut world.host()).expect("confirm");
    assert_eq!(
        status,
        Status::Paused(Suspension::AwaitingWalk {
            actor: "Banker".to_string()
        })
    );

    let status = finish_walk(&mut director, token, &mut world);
    assert_eq!(status, Status::Paused(Suspension::AwaitingConfirm));
    let banker = world.cast.get("Banker").expect("banker placed");
    assert_eq!(banker.position(), Position::new(192.0, 112.0));
    assert_eq!(banker.direction(), Direction::Down);
    assert_eq!(world.wallet.balance(), 15.0);
    assert!(world.flags.contains("hasAccount"));

    let status = director.confirm(token, &mut world.host()).expect("confirm");
    assert_eq!(status, Status::Finished);

    // Third visit: interest
    let (token, _) = director
        .begin("Banker", "Player", &entries, &mut world.host())
        .expect("third visit");
    assert_eq!(director.active_selection().map(|s| s.index()), Some(2));

    let status = director.confirm(token, &mut world.host()).expect("confirm");
    assert_eq!(status, Status::Finished);
    assert_eq!(world.wallet.balance(), 16.25);
    assert_eq!(world.screen.balance_label(), Some("$16.25"));
}

#[test]
fn shopkeeper_walks_itself_without_actor_ref() {
    let town = demo_town();
    let config = instant_text();
    let entries = town.talking("Shopkeeper").expect("shopkeeper exists").to_vec();
    let mut world = town.build_world(Box::new(MemoryFlagStore::new()), &config);
    let mut director = Director::new(config);

    let (token, _) = director
        .begin("Shopkeeper", "Player", &entries, &mut world.host())
        .expect("begin");
    // The player stands to the left
    let shopkeeper = world.cast.get("Shopkeeper").expect("shopkeeper placed");
    assert_eq!(shopkeeper.direction(), Direction::Left);

    let status = director.confirm(token, &mut world.host()).expect("confirm");
    assert_eq!(
        status,
        Status::Paused(Suspension::AwaitingWalk {
            actor: "Shopkeeper".to_string()
        })
    );

    let status = finish_walk(&mut director, token, &mut world);
    assert_eq!(status, Status::Paused(Suspension::AwaitingConfirm));
    let shopkeeper = world.cast.get("Shopkeeper").expect("shopkeeper placed");
    assert_eq!(shopkeeper.position(), Position::new(240.0, 192.0));
    assert_eq!(shopkeeper.direction(), Direction::Left);
}

#[test]
fn flags_survive_reopening_the_store() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("saves").join("flags.json");
    let town = demo_town();
    let config = instant_text();
    let entries = banker_entries(&town);

    {
        let store = JsonFlagStore::open(&path).expect("open store");
        let mut world = town.build_world(Box::new(store), &config);
        let mut director = Director::new(config.clone());
        let (token, _) = director
            .begin("Banker", "Player", &entries, &mut world.host())
            .expect("begin");
        director.abandon(token, &mut world.host()).expect("abandon");
    }

    let store = JsonFlagStore::open(&path).expect("reopen store");
    assert_eq!(store.get("metBanker"), None);

    {
        let store = JsonFlagStore::open(&path).expect("open store");
        let mut world = town.build_world(Box::new(store), &config);
        let mut director = Director::new(config.clone());
        let (token, _) = director
            .begin("Banker", "Player", &entries, &mut world.host())
            .expect("begin");
        director.confirm(token, &mut world.host()).expect("confirm");
        director.abandon(token, &mut world.host()).expect("abandon");
    }

    let store = JsonFlagStore::open(&path).expect("reopen store");
    assert_eq!(store.get("metBanker"), Some("1".to_string()));
    assert!(!store.contains("keepsBudget"));
}

#[test]
fn corrupt_flag_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("flags.json");
    std::fs::write(&path, "not json").expect("write");

    match JsonFlagStore::open(&path) {
        Err(StoreError::Corrupt { .. }) => {}
        other => panic!("Expected corrupt store error, got: {other:?}"),
    }
}

#[tokio::test]
async fn progress_saved_from_world_loads_back() {
    let dir = TempDir::new().expect("temp dir");
    let town = demo_town();
    let world = town.build_world(Box::new(MemoryFlagStore::new()), &instant_text());
    let player = world.cast.get(&world.player).expect("player placed");

    let progress = Progress {
        current_map: world.map.clone(),
        player_pos: player.position(),
        player_direction: player.direction(),
        save_key: "Budgetville_Test".to_string(),
    };
    let repository = JsonProgressRepository::new(dir.path());
    repository.save(&progress).await.expect("save");

    let loaded = repository
        .load("Budgetville_Test")
        .await
        .expect("load")
        .expect("slot exists");
    assert_eq!(loaded, progress);
    assert_eq!(loaded.player_direction, Direction::Up);

    repository.delete("Budgetville_Test").await.expect("delete");
    assert_eq!(repository.load("Budgetville_Test").await.expect("load"), None);
}
