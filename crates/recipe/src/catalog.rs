use std::sync::LazyLock;

use freshkeep_shared::category::ImageKey;

use crate::types::{Difficulty, Recipe, RecipeNutrition};

/// Built-in recipe catalog. Entries are ordered by id and never mutated at
/// runtime.
static CATALOG: LazyLock<Vec<Recipe>> = LazyLock::new(|| {
    vec![
        Recipe {
            id: "recipe_001".into(),
            name: "番茄意面".into(),
            image: ImageKey::Noodles,
            ingredients: vec![
                "番茄".into(),
                "意面".into(),
                "洋葱".into(),
                "大蒜".into(),
                "橄榄油".into(),
            ],
            cooking_time: "20分钟".into(),
            difficulty: Difficulty::Easy,
            servings: 2,
            description: "经典的意式番茄面，酸甜可口，营养丰富".into(),
            steps: vec![
                "将番茄切块，洋葱和大蒜切碎".into(),
                "热锅下橄榄油，爆香洋葱和大蒜".into(),
                "加入番茄块炒制出汁".into(),
                "煮意面至8分熟，捞起备用".into(),
                "将意面倒入番茄汁中拌匀".into(),
                "调味后装盘即可".into(),
            ],
            tips: "番茄要选择熟透的，这样做出来的面更香甜".into(),
            nutrition: RecipeNutrition {
                calories: 320,
                protein: 12,
                carbs: 58,
                fat: 8,
            },
        },
        Recipe {
            id: "recipe_002".into(),
            name: "醋溜土豆丝".into(),
            image: ImageKey::Potato,
            ingredients: vec![
                "土豆".into(),
                "青椒".into(),
                "醋".into(),
                "生抽".into(),
                "盐".into(),
            ],
            cooking_time: "15分钟".into(),
            difficulty: Difficulty::Easy,
            servings: 2,
            description: "爽脆酸甜的家常菜，开胃下饭".into(),
            steps: vec![
                "土豆去皮切丝，用清水浸泡去淀粉".into(),
                "青椒切丝备用".into(),
                "热锅下油，下土豆丝大火炒制".into(),
                "加入青椒丝继续炒".into(),
                "调入醋、生抽、盐炒匀".into(),
                "出锅装盘即可".into(),
            ],
            tips: "土豆丝要切得细一些，炒制时间不宜过长".into(),
            nutrition: RecipeNutrition {
                calories: 180,
                protein: 4,
                carbs: 35,
                fat: 3,
            },
        },
        Recipe {
            id: "recipe_003".into(),
            name: "香煎鸡蛋".into(),
            image: ImageKey::Eggs,
            ingredients: vec![
                "鸡蛋".into(),
                "盐".into(),
                "胡椒粉".into(),
                "油".into(),
            ],
            cooking_time: "5分钟".into(),
            difficulty: Difficulty::Easy,
            servings: 1,
            description: "简单营养的早餐选择，蛋白质丰富".into(),
            steps: vec![
                "鸡蛋打散，加入盐和胡椒粉调味".into(),
                "平底锅刷少量油加热".into(),
                "倒入蛋液，小火煎制".into(),
                "一面凝固后翻面继续煎".into(),
                "两面金黄即可出锅".into(),
            ],
            tips: "用小火慢煎，这样鸡蛋更嫩滑".into(),
            nutrition: RecipeNutrition {
                calories: 155,
                protein: 13,
                carbs: 1,
                fat: 11,
            },
        },
        Recipe {
            id: "recipe_004".into(),
            name: "香蕉奶昔".into(),
            image: ImageKey::Milk,
            ingredients: vec![
                "牛奶".into(),
                "香蕉".into(),
                "蜂蜜".into(),
                "冰块".into(),
            ],
            cooking_time: "3分钟".into(),
            difficulty: Difficulty::Easy,
            servings: 1,
            description: "营养丰富的饮品，适合早餐或下午茶".into(),
            steps: vec![
                "香蕉去皮切段".into(),
                "将香蕉、牛奶、蜂蜜放入搅拌机".into(),
                "加入适量冰块".into(),
                "搅拌至顺滑即可".into(),
                "倒入杯中享用".into(),
            ],
            tips: "香蕉要选择熟透的，口感更甜".into(),
            nutrition: RecipeNutrition {
                calories: 220,
                protein: 8,
                carbs: 35,
                fat: 6,
            },
        },
        Recipe {
            id: "recipe_005".into(),
            name: "火腿三明治".into(),
            image: ImageKey::Bread,
            ingredients: vec![
                "面包".into(),
                "火腿".into(),
                "生菜".into(),
                "番茄".into(),
                "黄油".into(),
            ],
            cooking_time: "10分钟".into(),
            difficulty: Difficulty::Easy,
            servings: 1,
            description: "营养均衡的快手早餐，方便携带".into(),
            steps: vec![
                "面包片烤至微黄".into(),
                "在面包上涂抹黄油".into(),
                "铺上生菜叶".into(),
                "放上火腿片和番茄片".into(),
                "盖上另一片面包".into(),
                "对角切开即可".into(),
            ],
            tips: "可以根据喜好添加其他蔬菜".into(),
            nutrition: RecipeNutrition {
                calories: 280,
                protein: 15,
                carbs: 25,
                fat: 12,
            },
        },
        Recipe {
            id: "recipe_006".into(),
            name: "蔬菜沙拉".into(),
            image: ImageKey::Salad,
            ingredients: vec![
                "生菜".into(),
                "番茄".into(),
                "黄瓜".into(),
                "胡萝卜".into(),
                "沙拉酱".into(),
            ],
            cooking_time: "8分钟".into(),
            difficulty: Difficulty::Easy,
            servings: 2,
            description: "清爽健康的蔬菜沙拉，低卡高纤维".into(),
            steps: vec![
                "生菜洗净撕成小片".into(),
                "番茄、黄瓜切块".into(),
                "胡萝卜切丝".into(),
                "将所有蔬菜混合".into(),
                "淋上沙拉酱拌匀".into(),
                "装盘即可享用".into(),
            ],
            tips: "蔬菜要洗净沥干水分，保持爽脆口感".into(),
            nutrition: RecipeNutrition {
                calories: 120,
                protein: 3,
                carbs: 15,
                fat: 6,
            },
        },
        Recipe {
            id: "recipe_007".into(),
            name: "番茄鸡蛋汤".into(),
            image: ImageKey::Eggs,
            ingredients: vec![
                "番茄".into(),
                "鸡蛋".into(),
                "葱花".into(),
                "盐".into(),
                "香油".into(),
            ],
            cooking_time: "12分钟".into(),
            difficulty: Difficulty::Easy,
            servings: 2,
            description: "经典家常汤品，酸甜开胃，营养丰富".into(),
            steps: vec![
                "番茄去皮切块".into(),
                "鸡蛋打散备用".into(),
                "热锅下油，炒制番茄出汁".into(),
                "加入适量清水煮开".into(),
                "倒入蛋液，快速搅拌成蛋花".into(),
                "调味撒葱花即可".into(),
            ],
            tips: "番茄要充分炒制出汁，汤的味道会更浓郁".into(),
            nutrition: RecipeNutrition {
                calories: 95,
                protein: 8,
                carbs: 6,
                fat: 5,
            },
        },
        Recipe {
            id: "recipe_008".into(),
            name: "土豆炖牛肉".into(),
            image: ImageKey::Potato,
            ingredients: vec![
                "土豆".into(),
                "牛肉".into(),
                "洋葱".into(),
                "胡萝卜".into(),
                "生抽".into(),
                "老抽".into(),
            ],
            cooking_time: "45分钟".into(),
            difficulty: Difficulty::Medium,
            servings: 3,
            description: "营养丰富的炖菜，土豆软糯，牛肉鲜嫩".into(),
            steps: vec![
                "牛肉切块，焯水去血沫".into(),
                "土豆、胡萝卜切块，洋葱切片".into(),
                "热锅下油，炒制牛肉至变色".into(),
                "加入洋葱炒香".into(),
                "加入生抽、老抽调色".into(),
                "加水没过食材，大火烧开转小火炖30分钟".into(),
                "加入土豆和胡萝卜继续炖15分钟".into(),
                "调味收汁即可".into(),
            ],
            tips: "牛肉要选择适合炖煮的部位，炖制时间要充足".into(),
            nutrition: RecipeNutrition {
                calories: 285,
                protein: 22,
                carbs: 25,
                fat: 12,
            },
        },
    ]
});

pub fn all() -> &'static [Recipe] {
    &CATALOG
}

pub fn by_id(recipe_id: &str) -> Option<&'static Recipe> {
    CATALOG.iter().find(|recipe| recipe.id == recipe_id)
}

pub fn by_difficulty(difficulty: Difficulty) -> Vec<&'static Recipe> {
    CATALOG
        .iter()
        .filter(|recipe| recipe.difficulty == difficulty)
        .collect()
}

/// Recipes whose cooking time fits within `max_minutes`.
pub fn by_max_time(max_minutes: u32) -> Vec<&'static Recipe> {
    CATALOG
        .iter()
        .filter(|recipe| recipe.cooking_minutes() <= max_minutes)
        .collect()
}
