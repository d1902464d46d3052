mod common;

use std::fs;

use tempfile::tempdir;
use vc_reflect::derive::Reflect;
use vc_save::{LoadResult, Location, SaveError, SaveSystem, StorageRoots};
use vc_task::block_on;

use common::{Cat, Creature, Dog, Journal, Profile, Zoo, downcast, system, system_with};

fn sample_zoo() -> Zoo {
    Zoo {
        name: "City Zoo".into(),
        animals: vec![
            Box::new(Dog {
                name: "Rex".into(),
                good: true,
            }),
            Box::new(Cat {
                name: "Tom".into(),
                lives: 9,
            }),
            Box::new(Creature { name: "Blob".into() }),
        ],
    }
}

#[test]
fn round_trip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("zoo.json");
    let system = system();

    system.save(&path, &mut sample_zoo()).unwrap();
    assert!(path.is_file());

    let loaded = system.load::<Zoo>(&path);
    assert_eq!(loaded.result, LoadResult::Success);
    assert!(loaded.error.is_none());

    let zoo = loaded.value.unwrap();
    assert_eq!(zoo.name, "City Zoo");
    assert_eq!(zoo.animals.len(), 3);
    assert_eq!(
        downcast::<Dog>(&*zoo.animals[0]),
        Some(&Dog {
            name: "Rex".into(),
            good: true
        })
    );
    assert_eq!(downcast::<Cat>(&*zoo.animals[1]).map(|cat| cat.lives), Some(9));
    assert!(downcast::<Creature>(&*zoo.animals[2]).is_some());
}

#[test]
fn persisted_layout() {
    let system = system();
    let text = system.to_text(&mut sample_zoo()).unwrap();
    let node: serde_json::Value = serde_json::from_str(&text).unwrap();

    // The root type is known from the call, elements record theirs.
    assert!(node.get("$type").is_none());
    assert_eq!(node["animals"][0]["$type"], "zoo::mammals::Dog, zoo_data");
    assert_eq!(node["animals"][2]["$type"], "zoo::Creature, zoo_data");
    assert!(text.starts_with("{\n  \"name\""));
}

#[test]
fn post_load_receives_path_and_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.json");
    let system = system();

    let mut journal = Journal {
        entries: vec!["day one".into(), "day two".into()],
        ..Journal::default()
    };
    system.save(&path, &mut journal).unwrap();

    let journal = system.load::<Journal>(&path).value.unwrap();
    assert_eq!(journal.post_load_calls, 1);
    assert_eq!(journal.loaded_name, "journal.json");
    assert_eq!(
        journal.loaded_path,
        fs::canonicalize(&path).unwrap().to_string_lossy()
    );
    assert_eq!(journal.entry_count, 2);
    // Not persisted, the hook of the saved value ran on the original.
    assert_eq!(journal.prepare_calls, 0);
}

#[test]
fn from_text_post_load_gets_empty_strings() {
    let system = system();
    let journal = system
        .from_text::<Journal>(r#"{"entries":["a"],"entry_count":1}"#)
        .unwrap()
        .unwrap();

    assert_eq!(journal.post_load_calls, 1);
    assert_eq!(journal.loaded_path, "");
    assert_eq!(journal.loaded_name, "");
    assert_eq!(journal.entries, ["a"]);
}

#[test]
fn prepare_save_runs_once_per_call() {
    let dir = tempdir().unwrap();
    let system = system();
    let mut journal = Journal {
        entries: vec!["x".into()],
        ..Journal::default()
    };

    system.save(dir.path().join("a.json"), &mut journal).unwrap();
    assert_eq!(journal.prepare_calls, 1);

    let text = system.to_text(&mut journal).unwrap();
    assert_eq!(journal.prepare_calls, 2);
    assert!(text.contains("\"entry_count\": 1"));

    system.compute_hash(&mut journal, "MD5").unwrap();
    assert_eq!(journal.prepare_calls, 3);

    system
        .save_with_hash(dir.path().join("b.json"), &mut journal, "MD5")
        .unwrap();
    assert_eq!(journal.prepare_calls, 4);
}

#[test]
fn corruption_classification() {
    let dir = tempdir().unwrap();
    let system = system();

    let empty = dir.path().join("empty.json");
    fs::write(&empty, b"").unwrap();
    let nulls = dir.path().join("nulls.json");
    fs::write(&nulls, [0_u8; 128]).unwrap();
    let broken = dir.path().join("broken.json");
    fs::write(&broken, b"{ \"name\": ").unwrap();

    assert_eq!(system.load::<Profile>("").result, LoadResult::EmptyPathGiven);
    assert_eq!(
        system.load::<Profile>(dir.path().join("missing.json")).result,
        LoadResult::FileDoesNotExist
    );
    assert_eq!(system.load::<Profile>(&empty).result, LoadResult::FileIsEmpty);
    assert_eq!(system.load::<Profile>(&nulls).result, LoadResult::FileIsAllNull);

    let loaded = system.load::<Profile>(&broken);
    assert_eq!(loaded.result, LoadResult::OtherError);
    assert!(loaded.error.is_some());
    assert!(loaded.value.is_none());
}

#[test]
fn null_file_is_success_without_value() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("null.json");
    fs::write(&path, "null").unwrap();

    let loaded = system().load::<Profile>(&path);
    assert_eq!(loaded.result, LoadResult::Success);
    assert!(loaded.value.is_none());
}

#[test]
fn unresolvable_hint_is_other_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("zoo.json");
    fs::write(
        &path,
        r#"{ "name": "Lost", "animals": [ { "$type": "zoo::Dog" }, { "$type": "nowhere::Unicorn" } ] }"#,
    )
    .unwrap();

    let loaded = system().load::<Zoo>(&path);
    assert_eq!(loaded.result, LoadResult::OtherError);
    assert!(loaded.error.unwrap().contains("animals[1]"));
}

#[test]
fn locations() {
    let dir = tempdir().unwrap();
    let roots = StorageRoots::new(dir.path().join("assets"), dir.path().join("saves"));
    let system = system_with(SaveSystem::builder().roots(roots));

    let mut profile = Profile::new("Ann", 3, 1234);
    system
        .save_to(Location::Streaming, "slots/1.json", &mut profile)
        .unwrap();
    assert!(dir.path().join("saves/slots/1.json").is_file());

    let loaded = system.load_from::<Profile>(Location::Streaming, "slots/1.json");
    assert_eq!(loaded.value, Some(Profile::new("Ann", 3, 1234)));

    let err = system
        .save_to(Location::Bundled, "levels/one.json", &mut profile)
        .unwrap_err();
    assert!(matches!(err, SaveError::ReadOnlyLocation(Location::Bundled)));

    fs::create_dir_all(dir.path().join("assets/levels")).unwrap();
    fs::write(
        dir.path().join("assets/levels/one.json"),
        r#"{ "name": "Level One", "level": 1 }"#,
    )
    .unwrap();
    let loaded = system.load_from::<Profile>(Location::Bundled, "levels/one.json");
    assert_eq!(loaded.value.map(|p| p.name), Some("Level One".to_owned()));
}

#[test]
fn save_replaces_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.json");
    let system = system();

    system.save(&path, &mut Profile::new("Old", 1, 0)).unwrap();
    system.save(&path, &mut Profile::new("New", 2, 0)).unwrap();

    let loaded = system.load::<Profile>(&path).value.unwrap();
    assert_eq!(loaded.name, "New");
    // No temporary file is left behind.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn empty_save_path() {
    let err = system().save("", &mut Profile::default()).unwrap_err();
    assert!(matches!(err, SaveError::EmptyPath));
}

#[test]
fn load_async() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profile.json");
    let system = system();
    system.save(&path, &mut Profile::new("Async", 5, 42)).unwrap();

    let loaded = block_on(system.load_async::<Profile>(&path));
    assert_eq!(loaded.result, LoadResult::Success);
    assert_eq!(loaded.value.map(|p| p.pin_code()), Some(42));

    let missing = block_on(system.load_async::<Profile>(dir.path().join("nope.json")));
    assert_eq!(missing.result, LoadResult::FileDoesNotExist);
}

#[derive(Reflect, Default, Debug)]
#[reflect(type_path = "physics::Body", module = "physics_data")]
struct Body {
    pub mass: f32,
    pub lift: Option<f64>,
}

#[test]
fn non_finite_floats_survive_a_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("body.json");
    let system = system();
    system.register::<Body>();

    let mut body = Body {
        mass: f32::INFINITY,
        lift: Some(f64::NAN),
    };
    system.save(&path, &mut body).unwrap();

    let loaded = system.load::<Body>(&path);
    assert_eq!(loaded.result, LoadResult::Success);
    let back = loaded.value.unwrap();
    assert_eq!(back.mass, f32::INFINITY);
    assert!(back.lift.is_some_and(f64::is_nan));

    let nan = system.compute_hash(&mut body, "MD5").unwrap();
    body.lift = None;
    assert_ne!(system.compute_hash(&mut body, "MD5").unwrap(), nan);
}
