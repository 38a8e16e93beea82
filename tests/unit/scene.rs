use super::*;

fn fixture() -> SceneDeck {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/scenes.json");
    SceneDeck::from_path(path).unwrap()
}

#[test]
fn fixture_deck_parses_every_variant() {
    let deck = fixture();
    let kinds: Vec<&str> = deck.scenes().iter().map(Scene::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "landing",
            "hero",
            "parallax",
            "split",
            "parallax",
            "split",
            "fullscreen-text",
            "finale"
        ]
    );
    let Scene::Split(split) = &deck.scenes()[3] else {
        panic!("expected split scene");
    };
    assert_eq!(split.side, Side::Left);
}

#[test]
fn hero_video_is_the_first_hero_background() {
    let deck = fixture();
    assert_eq!(deck.hero_video(), Some("media/intro.mp4"));

    let still = SceneDeck::new(vec![Scene::Hero(HeroScene {
        id: "h".to_owned(),
        title: "T".to_owned(),
        subtitle: None,
        quote: None,
        background: Some("img/still.png".to_owned()),
        is_video: false,
    })]);
    assert_eq!(still.hero_video(), None);
    assert_eq!(still.asset_urls(), vec!["img/still.png"]);
}

#[test]
fn asset_urls_list_still_images_once() {
    let mut deck = fixture();
    deck.scenes.push(Scene::Parallax(ParallaxScene {
        id: "again".to_owned(),
        title: String::new(),
        subtitle: String::new(),
        text: String::new(),
        background: "img/leonida.png".to_owned(),
    }));
    assert_eq!(
        deck.asset_urls(),
        vec![
            "img/leonida.png",
            "img/lucia.png",
            "https://example.invalid/streets.png",
            "img/power.svg",
        ]
    );
}

#[test]
fn unknown_tags_are_kept_as_unknown() {
    let json = r#"[{"id": "g", "type": "gallery", "images": []}, {"id": "f", "type": "finale", "title": "a", "subtitle": "b", "text": "c"}]"#;
    let deck = SceneDeck::from_reader(json.as_bytes()).unwrap();
    assert_eq!(deck.scenes()[0], Scene::Unknown);
    assert_eq!(deck.scenes()[0].id(), None);
    deck.validate().unwrap();
}

#[test]
fn validation_rejects_duplicates_and_empty_words() {
    let dup = r#"[
        {"id": "a", "type": "fullscreen-text", "words": ["X"]},
        {"id": "a", "type": "fullscreen-text", "words": ["Y"]}
    ]"#;
    let err = SceneDeck::from_reader(dup.as_bytes()).unwrap().validate().unwrap_err();
    assert!(err.to_string().contains("duplicate scene id 'a'"));

    let empty = r#"[{"id": "w", "type": "fullscreen-text", "words": []}]"#;
    assert!(SceneDeck::from_reader(empty.as_bytes()).unwrap().validate().is_err());

    let blank = r#"[{"id": "w", "type": "fullscreen-text", "words": ["ok", " "]}]"#;
    assert!(SceneDeck::from_reader(blank.as_bytes()).unwrap().validate().is_err());
}

#[test]
fn missing_required_field_is_a_serde_error() {
    let json = r#"[{"id": "s", "type": "split", "title": "t"}]"#;
    let err = SceneDeck::from_reader(json.as_bytes()).unwrap_err();
    assert!(matches!(err, CineloreError::Serde(_)));
}
