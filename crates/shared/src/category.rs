use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Canonical inventory buckets.
///
/// Stored categories are free text; they normalize into one of these ten
/// buckets via the fixed variant table, or via name keywords when no
/// stored label matches. Matching is plain substring containment on the
/// source script — table parity is the contract, no fuzzy logic.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum Category {
    #[strum(serialize = "蔬菜类")]
    Produce = 1,
    #[strum(serialize = "肉类")]
    Meat = 2,
    #[strum(serialize = "饮品")]
    Beverage = 3,
    #[strum(serialize = "主食")]
    Staple = 4,
    #[strum(serialize = "罐头")]
    Canned = 5,
    #[strum(serialize = "调料")]
    Seasoning = 6,
    #[strum(serialize = "海鲜")]
    Seafood = 7,
    #[strum(serialize = "熟食")]
    Deli = 8,
    #[strum(serialize = "水果")]
    Fruit = 9,
    #[strum(serialize = "其他")]
    Other = 10,
}

impl Category {
    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn from_id(id: u8) -> Option<Category> {
        use strum::VariantArray as _;
        Category::VARIANTS.iter().copied().find(|c| c.id() == id)
    }

    /// Known alternate spellings of the stored category label.
    ///
    /// The canonical name itself also matches; see [`Category::matches_label`].
    pub fn label_variants(&self) -> &'static [&'static str] {
        match self {
            Category::Produce => &["果蔬类", "蔬菜", "水果", "果蔬", "生鲜"],
            Category::Meat => &["肉类", "肉", "禽肉"],
            Category::Beverage => &["饮品", "乳制品", "奶制品", "乳品", "饮料"],
            Category::Staple => &["主食", "谷物", "粮食", "米面", "蛋类"],
            Category::Canned => &["罐头", "罐装食品"],
            Category::Seasoning => &["调料", "调味品", "佐料", "香料"],
            Category::Seafood => &["海鲜", "水产", "海产品"],
            Category::Deli => &["熟食", "卤菜", "熟制品"],
            Category::Fruit => &[],
            Category::Other => &[],
        }
    }

    /// Item-name keywords used as the fallback pass when no stored label
    /// matched a bucket. Fruit and Other have no keyword entry.
    pub fn name_keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Produce => &[
                "蔬菜", "水果", "番茄", "土豆", "白菜", "萝卜", "苹果", "香蕉",
            ],
            Category::Meat => &["肉", "牛肉", "猪肉", "鸡肉", "鱼", "虾"],
            Category::Beverage => &["牛奶", "酸奶", "奶酪", "黄油", "饮品", "饮料"],
            Category::Staple => &[
                "米", "面", "面包", "面条", "馒头", "包子", "蛋", "鸡蛋", "鸭蛋", "鹌鹑蛋",
            ],
            Category::Canned => &["罐头", "午餐肉", "鱼罐头"],
            Category::Seasoning => &["盐", "糖", "醋", "酱油", "料酒", "胡椒"],
            Category::Seafood => &[
                "海鲜", "虾", "蟹", "鱼", "贝", "海带", "紫菜", "鲍鱼", "扇贝",
            ],
            Category::Deli => &["熟食", "卤菜", "烧鸡", "烤鸭", "火腿", "香肠", "腊肉"],
            Category::Fruit => &[],
            Category::Other => &[],
        }
    }

    /// True when a stored category label belongs to this bucket, either as
    /// the canonical name or one of its variants.
    pub fn matches_label(&self, label: &str) -> bool {
        self.as_ref() == label || self.label_variants().contains(&label)
    }

    /// True when an item name contains any of this bucket's keywords.
    pub fn matches_name(&self, item_name: &str) -> bool {
        self.name_keywords().iter().any(|kw| item_name.contains(kw))
    }

    /// Exact pass: resolve a stored category label to its bucket.
    pub fn from_label(label: &str) -> Option<Category> {
        use strum::VariantArray as _;
        Category::VARIANTS
            .iter()
            .copied()
            .find(|c| c.matches_label(label))
    }

    /// Fallback pass: resolve an item name through the keyword table,
    /// scanning buckets in id order.
    pub fn from_item_name(item_name: &str) -> Option<Category> {
        use strum::VariantArray as _;
        Category::VARIANTS
            .iter()
            .copied()
            .find(|c| c.matches_name(item_name))
    }

    /// Resolve an item to its bucket: stored label first, name keywords
    /// second, `Other` when nothing matches.
    pub fn resolve(category_label: &str, item_name: &str) -> Category {
        Category::from_label(category_label)
            .or_else(|| Category::from_item_name(item_name))
            .unwrap_or(Category::Other)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Produce => "新鲜的水果和蔬菜，富含维生素和纤维，建议冷藏保存。",
            Category::Meat => "各种肉类食品，富含蛋白质，需要冷藏或冷冻保存。",
            Category::Beverage => "牛奶、酸奶等乳制品，需要冷藏保存，注意保质期。",
            Category::Staple => "米面等主食类，提供碳水化合物，常温干燥保存。",
            Category::Canned => "各种罐装食品，保质期较长，常温保存即可。",
            Category::Seasoning => "各种调味品，增加食物风味，密封保存。",
            _ => "各种食材，请注意保存方式和保质期。",
        }
    }
}

/// Representative display image for an item.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ImageKey {
    Milk,
    Eggs,
    Bread,
    Salad,
    Potato,
    Noodles,
}

const NAME_IMAGES: &[(&str, ImageKey)] = &[
    ("牛奶", ImageKey::Milk),
    ("鸡蛋", ImageKey::Eggs),
    ("面包", ImageKey::Bread),
    ("蔬菜", ImageKey::Salad),
    ("沙拉", ImageKey::Salad),
    ("土豆", ImageKey::Potato),
    ("面条", ImageKey::Noodles),
];

const CATEGORY_IMAGES: &[(&str, ImageKey)] = &[
    ("乳制品", ImageKey::Milk),
    ("蛋类", ImageKey::Eggs),
    ("主食", ImageKey::Bread),
    ("生鲜", ImageKey::Salad),
    ("蔬菜", ImageKey::Salad),
    ("肉类", ImageKey::Potato),
];

/// Pick the display image for an item: name substring first, stored
/// category label second, salad as the generic default.
pub fn resolve_image(item_name: &str, category_label: &str) -> ImageKey {
    for (needle, key) in NAME_IMAGES {
        if item_name.contains(needle) {
            return *key;
        }
    }

    for (label, key) in CATEGORY_IMAGES {
        if category_label == *label {
            return *key;
        }
    }

    ImageKey::Salad
}
