use indexmap::IndexMap;
use indoc::indoc;
use serde_json::json;

use crate::Error;
use crate::intents::{Intents, RawIntents, SlotList, TextSlotList};

use super::error::MatchError;
use super::recognize::{RecognizeOptions, recognize, recognize_all};

fn load(json: &str) -> Intents {
    let raw: RawIntents = serde_json::from_str(json).expect("valid document");
    Intents::from_raw(raw).expect("valid templates")
}

fn home_intents() -> Intents {
    load(indoc! {r#"
        {
          "intents": {
            "TurnOn": {
              "data": [
                {
                  "sentences": ["turn on [the] {name}"],
                  "slots": { "domain": "light" },
                  "response": "turned_on"
                }
              ]
            },
            "TurnOff": {
              "data": [ { "sentences": ["turn off [the] {name}"] } ]
            }
          },
          "lists": { "name": { "values": ["lamp", "fan"] } },
          "skip_words": ["please"]
        }
    "#})
}

#[test]
fn recognizes_an_intent_with_entities() {
    let intents = home_intents();

    let result = recognize("please turn on the lamp", &intents, RecognizeOptions::default())
        .unwrap()
        .expect("matches TurnOn");

    assert_eq!(result.intent.name, "TurnOn");
    assert_eq!(result.entities["name"].value, json!("lamp"));
    assert_eq!(result.entities["domain"].value, json!("light"));
    // Fixed slots are injected without consuming input.
    assert_eq!(result.entities["domain"].text, "");
    assert_eq!(result.response.as_deref(), Some("turned_on"));
}

#[test]
fn no_match_returns_none() {
    let intents = home_intents();

    let result = recognize("open the garage", &intents, RecognizeOptions::default()).unwrap();
    assert!(result.is_none());
}

#[test]
fn response_falls_back_to_the_default() {
    let intents = home_intents();

    let result = recognize("turn off the fan", &intents, RecognizeOptions::default())
        .unwrap()
        .expect("matches TurnOff");
    assert_eq!(result.response.as_deref(), Some("default"));

    let options = RecognizeOptions {
        default_response: None,
        ..Default::default()
    };
    let result = recognize("turn off the fan", &intents, options).unwrap().unwrap();
    assert_eq!(result.response, None);
}

#[test]
fn results_follow_catalogue_order() {
    let intents = load(indoc! {r#"
        {
          "intents": {
            "First": { "data": [ { "sentences": ["hello there"] } ] },
            "Second": { "data": [ { "sentences": ["hello there"] } ] }
          }
        }
    "#});

    let names: Vec<String> = recognize_all("hello there", &intents, RecognizeOptions::default())
        .map(|result| result.unwrap().intent.name.clone())
        .collect();
    assert_eq!(names, vec!["First", "Second"]);
}

#[test]
fn duplicate_entity_names_keep_list_but_last_wins_by_name() {
    let intents = load(indoc! {r#"
        {
          "intents": {
            "Swap": { "data": [ { "sentences": ["move {name} {name}"] } ] }
          },
          "lists": { "name": { "values": ["lamp", "fan"] } }
        }
    "#});

    let result = recognize("move lamp fan", &intents, RecognizeOptions::default())
        .unwrap()
        .expect("both slots filled");

    assert_eq!(result.entities_list.len(), 2);
    assert_eq!(result.entities_list[0].value, json!("lamp"));
    assert_eq!(result.entities_list[1].value, json!("fan"));
    assert_eq!(result.entities.len(), 1);
    assert_eq!(result.entities["name"].value, json!("fan"));
}

#[test]
fn requires_context_null_accepts_any_set_value() {
    let intents = load(indoc! {r#"
        {
          "intents": {
            "Guarded": {
              "data": [
                {
                  "sentences": ["do the thing"],
                  "requires_context": { "area": null }
                }
              ]
            }
          }
        }
    "#});

    assert!(
        recognize("do the thing", &intents, RecognizeOptions::default())
            .unwrap()
            .is_none()
    );

    let context = IndexMap::from([("area".to_string(), json!("kitchen"))]);
    let options = RecognizeOptions {
        intent_context: Some(&context),
        ..Default::default()
    };
    assert!(recognize("do the thing", &intents, options).unwrap().is_some());
}

#[test]
fn requires_context_value_must_match() {
    let intents = load(indoc! {r#"
        {
          "intents": {
            "Night": {
              "data": [
                {
                  "sentences": ["dim everything"],
                  "requires_context": { "mode": "night" }
                }
              ]
            }
          }
        }
    "#});

    let night = IndexMap::from([("mode".to_string(), json!("night"))]);
    let day = IndexMap::from([("mode".to_string(), json!("day"))]);

    let options = RecognizeOptions {
        intent_context: Some(&night),
        ..Default::default()
    };
    assert!(recognize("dim everything", &intents, options).unwrap().is_some());

    let options = RecognizeOptions {
        intent_context: Some(&day),
        ..Default::default()
    };
    assert!(recognize("dim everything", &intents, options).unwrap().is_none());
}

#[test]
fn requires_context_accepts_membership_in_a_list() {
    let intents = load(indoc! {r#"
        {
          "intents": {
            "Inside": {
              "data": [
                {
                  "sentences": ["close the blinds"],
                  "requires_context": { "area": ["bedroom", "office"] }
                }
              ]
            }
          }
        }
    "#});

    let office = IndexMap::from([("area".to_string(), json!("office"))]);
    let garage = IndexMap::from([("area".to_string(), json!("garage"))]);

    let options = RecognizeOptions {
        intent_context: Some(&office),
        ..Default::default()
    };
    assert!(recognize("close the blinds", &intents, options).unwrap().is_some());

    let options = RecognizeOptions {
        intent_context: Some(&garage),
        ..Default::default()
    };
    assert!(recognize("close the blinds", &intents, options).unwrap().is_none());
}

#[test]
fn excludes_context_rejects_matching_values() {
    let intents = load(indoc! {r#"
        {
          "intents": {
            "Lock": {
              "data": [
                {
                  "sentences": ["lock up"],
                  "excludes_context": { "area": ["garage", "attic"] }
                }
              ]
            }
          }
        }
    "#});

    let garage = IndexMap::from([("area".to_string(), json!("garage"))]);
    let kitchen = IndexMap::from([("area".to_string(), json!("kitchen"))]);

    let options = RecognizeOptions {
        intent_context: Some(&garage),
        ..Default::default()
    };
    assert!(recognize("lock up", &intents, options).unwrap().is_none());

    let options = RecognizeOptions {
        intent_context: Some(&kitchen),
        ..Default::default()
    };
    assert!(recognize("lock up", &intents, options).unwrap().is_some());
}

#[test]
fn caller_slot_lists_override_the_catalogue() {
    let intents = home_intents();
    let lists = IndexMap::from([(
        "name".to_string(),
        SlotList::Text(TextSlotList::from_strings(["heater"], true).unwrap()),
    )]);
    let options = RecognizeOptions {
        slot_lists: Some(&lists),
        ..Default::default()
    };

    assert!(recognize("turn on the heater", &intents, options).unwrap().is_some());

    // The catalogue's own values are shadowed, not merged.
    let options = RecognizeOptions {
        slot_lists: Some(&lists),
        ..Default::default()
    };
    assert!(recognize("turn on the lamp", &intents, options).unwrap().is_none());
}

#[test]
fn missing_list_aborts_recognition() {
    let intents = load(indoc! {r#"
        {
          "intents": {
            "Broken": { "data": [ { "sentences": ["turn off {unknown}"] } ] }
          }
        }
    "#});

    let error = recognize("turn off kitchen", &intents, RecognizeOptions::default())
        .expect_err("the list is not defined");
    assert_eq!(error, Error::Match(MatchError::MissingList("unknown".to_string())));
}

#[test]
fn first_match_leaves_later_branches_unexplored() {
    let intents = load(indoc! {r#"
        {
          "intents": {
            "Lazy": { "data": [ { "sentences": ["{name}|{missing}"] } ] }
          },
          "lists": { "name": { "values": ["lamp"] } }
        }
    "#});

    // The first alternative matches, so the branch referencing the
    // undefined list is never pulled.
    let result = recognize("lamp", &intents, RecognizeOptions::default())
        .unwrap()
        .expect("the first branch matches");
    assert_eq!(result.intent.name, "Lazy");

    // Draining past the first result does reach it.
    let mut results = recognize_all("lamp", &intents, RecognizeOptions::default());
    assert!(results.next().unwrap().is_ok());
    assert!(results.next().unwrap().is_err());
    assert!(results.next().is_none());
}

#[test]
fn recognize_all_fuses_after_an_error() {
    let intents = load(indoc! {r#"
        {
          "intents": {
            "Broken": { "data": [ { "sentences": ["turn off {unknown}"] } ] }
          }
        }
    "#});

    let mut results = recognize_all("turn off kitchen", &intents, RecognizeOptions::default());
    assert!(results.next().unwrap().is_err());
    assert!(results.next().is_none());
}
