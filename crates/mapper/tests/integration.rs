use std::path::PathBuf;

use rigmap_mapper::{
    suggest, suggest_blendshapes, suggest_joints, MapperConfig, MatchRule, Profile, SuggestOptions,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_names(file: &str) -> Vec<String> {
    let path = fixtures_dir().join(file);
    let data = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&data).unwrap()
}

// -------------------------------------------------------------------------
// Joints: mocap skeleton onto a Mixamo armature
// -------------------------------------------------------------------------

#[test]
fn mocap_onto_mixamo() {
    let source = load_names("mocap_joints.json");
    let target = load_names("mixamo_bones.json");
    let mapping = suggest_joints(&source, &target);

    assert_eq!(mapping.len(), source.len());

    // Short names fall below the cutoff against the prefixed bone and are
    // picked up by the substring pass.
    for name in ["Hips", "Neck", "Head"] {
        let e = mapping.entry(name).unwrap();
        assert_eq!(e.target.as_deref(), Some(format!("mixamorig:{name}").as_str()));
        assert_eq!(e.rule, MatchRule::Substring, "{name}");
    }

    // Exactly at the cutoff still counts.
    let spine = mapping.entry("Spine").unwrap();
    assert_eq!(spine.target.as_deref(), Some("mixamorig:Spine"));
    assert_eq!(spine.rule, MatchRule::Fuzzy);
    assert_eq!(spine.score, Some(0.5));

    assert_eq!(mapping.get("Spine1"), Some(Some("mixamorig:Spine1")));
    assert_eq!(mapping.get("LeftArm"), Some(Some("mixamorig:LeftArm")));
    assert_eq!(mapping.get("LeftForeArm"), Some(Some("mixamorig:LeftForeArm")));
    assert_eq!(mapping.get("RightUpLeg"), Some(Some("mixamorig:RightUpLeg")));
    assert_eq!(mapping.get("RightFoot"), Some(Some("mixamorig:RightFoot")));

    assert_eq!(mapping.get("LeftToeBase"), Some(None));
    assert_eq!(mapping.get("Tail_01"), Some(None));

    let s = mapping.summary();
    assert_eq!(s.exact, 0);
    assert_eq!(s.substring, 3);
    assert_eq!(s.fuzzy, 16);
    assert_eq!(s.unmatched, 2);
}

#[test]
fn mapping_keeps_source_order() {
    let source = load_names("mocap_joints.json");
    let target = load_names("mixamo_bones.json");
    let mapping = suggest_joints(&source, &target);

    let keys: Vec<&str> = mapping.iter().map(|(k, _)| k).collect();
    let expected: Vec<&str> = source.iter().map(String::as_str).collect();
    assert_eq!(keys, expected);
}

// -------------------------------------------------------------------------
// Blendshapes: generated names onto mesh shapekeys
// -------------------------------------------------------------------------

#[test]
fn generated_onto_shapekeys() {
    let source = load_names("generated_blendshapes.json");
    let target = load_names("mesh_shapekeys.json");
    let mapping = suggest_blendshapes(&source, &target);

    for name in ["jawOpen", "browInnerUp", "cheekPuff"] {
        assert_eq!(mapping.get(name), Some(Some(name)));
        assert_eq!(mapping.entry(name).unwrap().rule, MatchRule::Exact);
    }

    assert_eq!(mapping.get("mouthSmile_L"), Some(Some("mouthSmileLeft")));
    assert_eq!(mapping.get("mouthSmile_R"), Some(Some("mouthSmileRight")));
    assert_eq!(mapping.get("eyeBlink_L"), Some(Some("eyeBlinkLeft")));
    assert_eq!(mapping.get("eyeBlink_R"), Some(Some("eyeBlinkRight")));
    assert_eq!(mapping.get("mouth_funnel"), Some(Some("mouthFunnel")));

    assert_eq!(mapping.get("tongueOut"), Some(None));
    assert_eq!(mapping.get("viseme_AA"), Some(None));
}

#[test]
fn json_output_shape() {
    let mapping = suggest_blendshapes(&["mouth_open", "smile_R", "brow_up"], &["Mouth_Open", "Smile_Right"]);
    let json = serde_json::to_string(&mapping).unwrap();
    assert_eq!(
        json,
        r#"{"mouth_open":"Mouth_Open","smile_R":"Smile_Right","brow_up":null}"#
    );
}

// -------------------------------------------------------------------------
// Scenarios
// -------------------------------------------------------------------------

#[test]
fn scenario_empty_target() {
    let target: Vec<String> = Vec::new();
    let mapping = suggest_blendshapes(&["brow_up"], &target);
    assert_eq!(serde_json::to_string(&mapping).unwrap(), r#"{"brow_up":null}"#);
}

#[test]
fn scenario_exact_case_sensitive() {
    let mapping = suggest_joints(&["Hip"], &["Hip", "Spine"]);
    assert_eq!(serde_json::to_string(&mapping).unwrap(), r#"{"Hip":"Hip"}"#);
}

#[test]
fn scenario_prefixed_bone() {
    let mapping = suggest_joints(&["LeftArm"], &["mixamorig:LeftArm"]);
    assert_eq!(mapping.get("LeftArm"), Some(Some("mixamorig:LeftArm")));
}

// -------------------------------------------------------------------------
// Config-driven options
// -------------------------------------------------------------------------

#[test]
fn config_overrides_cutoff() {
    let config = MapperConfig::from_toml("[joint]\ncutoff = 0.9\n").unwrap();
    let options = config.options_for(Profile::Joint);
    let mapping = suggest(&["LeftArm"], &["mixamorig:LeftArm"], &options).unwrap();

    // Fuzzy no longer clears; substring still finds it.
    let e = mapping.entry("LeftArm").unwrap();
    assert_eq!(e.rule, MatchRule::Substring);
    assert_eq!(e.target.as_deref(), Some("mixamorig:LeftArm"));
}

#[test]
fn config_reject_duplicates() {
    let config = MapperConfig::from_toml("on_duplicate = \"reject\"\n").unwrap();
    let options = config.options_for(Profile::Blendshape);
    let err = suggest(&["jawOpen", "jawOpen"], &["jawOpen"], &options).unwrap_err();
    assert!(err.to_string().contains("\"jawOpen\" x2"), "{err}");
}

#[test]
fn report_carries_options_and_rules() {
    let options = SuggestOptions::for_profile(Profile::Joint);
    let mapping = suggest(&["Hips", "Hip", "Tail"], &["Hip", "mixamorig:Hips"], &options).unwrap();
    let report = mapping.report(Profile::Joint, &options);
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["profile"], "joint");
    assert_eq!(value["cutoff"], 0.5);
    assert_eq!(value["substring"], "either");
    assert_eq!(value["on_duplicate"], "last_wins");
    assert_eq!(value["skip_empty_names"], false);
    assert_eq!(value["summary"]["exact"], 1);
    assert_eq!(value["entries"][1]["rule"], "exact");
    assert_eq!(value["entries"][2]["rule"], "unmatched");
    assert!(value["entries"][2]["target"].is_null());
    assert!(value["entries"][1].get("score").is_none());
}
