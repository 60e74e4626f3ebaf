//! Integration tests for introspection, editing and notification

use std::cell::RefCell;
use std::rc::Rc;

use propgrid_core::{
    build_groups, instance_ref, Accessor, AccessError, CategoryGroup, DynamicObject, EditorKind, EnumType,
    Inspectable, Inspector, InspectorConfig, InstanceRef, PropertyDescriptor, TreeNode, Value, ValueType,
};

/// A settings type with a hand-written descriptor table
struct EditorSettings {
    theme: Rc<EnumType>,
    font_size: i64,
    word_wrap: bool,
    theme_index: usize,
    region: String,
    regions: Vec<TreeNode>,
    build_id: String,
}

impl EditorSettings {
    fn new() -> Self {
        Self {
            theme: EnumType::new("Theme", ["Default", "Light", "Dark"]),
            font_size: 42,
            word_wrap: true,
            theme_index: 0,
            region: String::new(),
            regions: vec![
                TreeNode::branch(
                    "一级 A",
                    vec![
                        TreeNode::branch("二级 A1", vec![TreeNode::leaf("三级 A1-1"), TreeNode::leaf("三级 A1-2")]),
                        TreeNode::branch("二级 A2", vec![TreeNode::leaf("三级 A2-1")]),
                    ],
                ),
                TreeNode::branch(
                    "一级 B",
                    vec![TreeNode::branch("二级 B1", vec![TreeNode::leaf("三级 B1-1")])],
                ),
            ],
            build_id: "2024.1".to_string(),
        }
    }
}

impl Inspectable for EditorSettings {
    fn descriptors(&self) -> Vec<PropertyDescriptor> {
        vec![
            PropertyDescriptor::new("FontSize", ValueType::Int)
                .with_display_name("Font Size")
                .with_category("appearance"),
            PropertyDescriptor::new("WordWrap", ValueType::Bool)
                .with_display_name("Word Wrap")
                .with_category("Behavior"),
            PropertyDescriptor::new("Theme", ValueType::Enum(Rc::clone(&self.theme))).with_category("Appearance"),
            PropertyDescriptor::new("Region", ValueType::String)
                .with_category("Behavior")
                .with_cascader(Some("Regions")),
            PropertyDescriptor::new("Regions", ValueType::List).hidden(),
            PropertyDescriptor::new("BuildId", ValueType::String)
                .with_display_name("Build")
                .read_only(),
        ]
    }

    fn get(&self, name: &str) -> Option<Value> {
        match name {
            "FontSize" => Some(Value::Int(self.font_size)),
            "WordWrap" => Some(Value::Bool(self.word_wrap)),
            "Theme" => self.theme.value_at(self.theme_index).map(Value::Enum),
            "Region" => Some(Value::string(&self.region)),
            "Regions" => Some(Value::forest(self.regions.iter().cloned())),
            "BuildId" => Some(Value::string(&self.build_id)),
            _ => None,
        }
    }

    fn set(&mut self, name: &str, value: Value) -> Result<(), AccessError> {
        let mismatch = |expected: &str, value: &Value| AccessError::TypeMismatch {
            property: name.to_string(),
            expected: expected.to_string(),
            actual: value.type_name(),
        };
        match (name, value) {
            ("FontSize", Value::Int(n)) => self.font_size = n,
            ("WordWrap", Value::Bool(b)) => self.word_wrap = b,
            ("Theme", Value::Enum(e)) if e.enum_type() == &self.theme => self.theme_index = e.index(),
            ("Region", Value::String(s)) => self.region = s.to_string(),
            ("Region", Value::Null) => self.region.clear(),
            ("BuildId" | "Regions", _) => return Err(AccessError::ReadOnly(name.to_string())),
            ("FontSize", v) => return Err(mismatch("Int64", &v)),
            ("WordWrap", v) => return Err(mismatch("Boolean", &v)),
            ("Theme", v) => return Err(mismatch("Theme", &v)),
            ("Region", v) => return Err(mismatch("String", &v)),
            _ => return Err(AccessError::UnknownProperty(name.to_string())),
        }
        Ok(())
    }
}

fn settings() -> InstanceRef {
    instance_ref(EditorSettings::new())
}

fn layout(groups: &[CategoryGroup]) -> Vec<(String, Vec<(String, EditorKind)>)> {
    groups
        .iter()
        .map(|g| {
            let entries = g
                .entries()
                .iter()
                .map(|e| (e.name().to_string(), e.editor_kind()))
                .collect();
            (g.name().to_string(), entries)
        })
        .collect()
}

#[test]
fn test_build_is_deterministic() {
    let instance = settings();
    let config = InspectorConfig::default();
    let first = build_groups(&instance, &config);
    let second = build_groups(&instance, &config);
    assert_eq!(layout(&first), layout(&second));

    let groups: Vec<&str> = first.iter().map(CategoryGroup::name).collect();
    assert_eq!(groups, vec!["appearance", "Behavior", "Misc"]);
    let appearance: Vec<&str> = first[0].entries().iter().map(|e| e.display_name()).collect();
    assert_eq!(appearance, vec!["Font Size", "Theme"]);
}

#[test]
fn test_case_variant_categories_group_together() {
    let instance = DynamicObject::new()
        .with_property(PropertyDescriptor::new("one", ValueType::Int).with_category("b"), 1)
        .with_property(PropertyDescriptor::new("two", ValueType::Int).with_category("A"), 2)
        .with_property(PropertyDescriptor::new("three", ValueType::Int).with_category("a"), 3)
        .into_ref();
    let groups = build_groups(&instance, &InspectorConfig::default());

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name(), "A");
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[1].name(), "b");
}

#[test]
fn test_bool_and_enum_classification() {
    let inspector = Inspector::with_instance(InspectorConfig::default(), settings());

    let wrap = inspector.entry("WordWrap").unwrap();
    assert_eq!(wrap.editor_kind(), EditorKind::Bool);
    assert!(wrap.bool_value());

    let theme = inspector.entry("Theme").unwrap();
    assert_eq!(theme.editor_kind(), EditorKind::Enum);
    let names: Vec<&str> = theme.enum_values().iter().map(|v| v.name()).collect();
    assert_eq!(names, vec!["Default", "Light", "Dark"]);
    assert_eq!(theme.type_name(), "Theme");
}

#[test]
fn test_numeric_round_trip() {
    let mut inspector = Inspector::with_instance(InspectorConfig::default(), settings());
    let entry = inspector.entry_mut("FontSize").unwrap();

    let text = entry.string_value();
    assert_eq!(text, "42");
    entry.set_string_value(&text);
    assert_eq!(entry.value(), Value::Int(42));
}

#[test]
fn test_non_numeric_text_is_dropped_silently() {
    let instance = settings();
    let mut inspector = Inspector::with_instance(InspectorConfig::default(), Rc::clone(&instance));
    let entry = inspector.entry_mut("FontSize").unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    entry.subscribe(move |e| sink.borrow_mut().push(e.accessor));

    entry.set_string_value("large");
    assert_eq!(entry.string_value(), "42");
    assert_eq!(instance.borrow().get("FontSize"), Some(Value::Int(42)));
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_every_write_notifies_all_display_accessors() {
    let mut inspector = Inspector::with_instance(InspectorConfig::default(), settings());
    let entry = inspector.entry_mut("WordWrap").unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let id = entry.subscribe(move |e| sink.borrow_mut().push(e.accessor.name()));

    entry.set_bool_value(false);
    assert_eq!(
        *seen.borrow(),
        vec!["string_value", "bool_value", "enum_value", "selected_item", "selected_item_display"]
    );
    assert_eq!(entry.string_value(), "false");

    assert!(entry.unsubscribe(id));
    entry.set_bool_value(true);
    assert_eq!(seen.borrow().len(), 5);
}

#[test]
fn test_level1_change_resets_lower_levels() {
    let mut inspector = Inspector::with_instance(InspectorConfig::default(), settings());
    let region = inspector.entry_mut("Region").unwrap();
    assert_eq!(region.editor_kind(), EditorKind::Cascader);

    region.set_selected_level1(Some(region.level1_options()[0].clone()));
    region.set_selected_level2(Some(region.level2_options()[1].clone()));
    assert_eq!(region.level3_options().len(), 1);

    let b = region.level1_options()[1].clone();
    region.set_selected_level1(Some(b.clone()));
    assert!(region.selected_level2().is_none());
    assert!(region.selected_level3().is_none());
    assert!(region.level3_options().is_empty());

    let expected: Vec<&str> = b.children().iter().map(TreeNode::label).collect();
    let actual: Vec<&str> = region.level2_options().iter().map(TreeNode::label).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_cascade_commit_writes_path() {
    let instance = settings();
    let mut inspector = Inspector::with_instance(InspectorConfig::default(), Rc::clone(&instance));
    let region = inspector.entry_mut("Region").unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    region.subscribe(move |e| sink.borrow_mut().push(e.accessor));

    region.toggle_cascader();
    region.set_selected_level1(Some(region.level1_options()[0].clone()));
    region.set_selected_level2(Some(region.level2_options()[0].clone()));
    region.set_selected_level3(Some(region.level3_options()[0].clone()));

    assert_eq!(region.string_value(), "一级 A/二级 A1/三级 A1-1");
    assert_eq!(
        instance.borrow().get("Region"),
        Some(Value::string("一级 A/二级 A1/三级 A1-1"))
    );
    assert!(!region.is_cascader_open());
    assert_eq!(seen.borrow().first(), Some(&Accessor::CascaderOpen));
    assert_eq!(seen.borrow().last(), Some(&Accessor::CascaderOpen));
}

#[test]
fn test_cascade_reseeds_after_refresh() {
    let mut inspector = Inspector::with_instance(InspectorConfig::default(), settings());
    {
        let region = inspector.entry_mut("Region").unwrap();
        region.set_selected_level1(Some(region.level1_options()[1].clone()));
        region.set_selected_level2(Some(region.level2_options()[0].clone()));
        region.set_selected_level3(Some(region.level3_options()[0].clone()));
    }

    inspector.refresh();
    let region = inspector.entry("Region").unwrap();
    assert_eq!(region.selected_level1().map(TreeNode::label), Some("一级 B"));
    assert_eq!(region.selected_level3().map(TreeNode::label), Some("三级 B1-1"));
}

#[test]
fn test_list_picker_identity_wins() {
    let shared = Value::string("Mono");
    let instance = DynamicObject::new()
        .with_property(
            PropertyDescriptor::new("Font", ValueType::String).with_list_picker("Fonts"),
            shared.clone(),
        )
        .with_property(
            PropertyDescriptor::new("Fonts", ValueType::List).hidden(),
            Value::list([Value::string("Mono"), shared.clone()]),
        )
        .into_ref();
    let inspector = Inspector::with_instance(InspectorConfig::default(), instance);

    let font = inspector.entry("Font").unwrap();
    assert_eq!(font.editor_kind(), EditorKind::ListPicker);
    assert!(font.selected_item().unwrap().same_ref(&shared));
    assert!(!font.selected_item().unwrap().same_ref(&font.item_options()[0]));
}

#[test]
fn test_read_only_entry_ignores_edits() {
    let instance = settings();
    let mut inspector = Inspector::with_instance(InspectorConfig::default(), Rc::clone(&instance));
    let build = inspector.entry_mut("BuildId").unwrap();
    assert!(build.is_read_only());

    build.set_string_value("dev");
    assert_eq!(instance.borrow().get("BuildId"), Some(Value::string("2024.1")));
}

#[test]
fn test_snapshot_serializes() {
    let inspector = Inspector::with_instance(InspectorConfig::default(), settings());
    let json = serde_json::to_string(&inspector.snapshot()).unwrap();
    assert!(json.contains("\"display_name\":\"Font Size\""));
    assert!(json.contains("\"kind\":\"cascader\""));
    assert!(!json.contains("Regions"));
}
