// src/dungeon/src/tables.rs
//! 静态内容表

use hero::Class;

/// 怪物模板
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub image: &'static str,
    pub damage_min: u32,
    pub damage_max: u32,
    pub depth_factor: f64,
    pub class: Class,
    pub flavor: Option<&'static str>,
}

/// 宝藏模板
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreasureTemplate {
    pub name: &'static str,
    pub image: &'static str,
    pub value_min: u32,
    pub value_max: u32,
    pub depth_value_factor: u32,
}

/// Boss 模板，伤害区间由所在层数决定
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossTemplate {
    pub name: &'static str,
    pub image: &'static str,
    pub class: Class,
    pub flavor: &'static str,
}

impl BossTemplate {
    /// 第 `level` 层的伤害区间
    pub fn damage_range(&self, level: u32) -> (u32, u32) {
        (10 + level * 2, 15 + level * 3)
    }

    pub const DEPTH_FACTOR: f64 = 2.0;
}

/// 关卡主题：一个 Boss 加三种怪物
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelTheme {
    pub title: &'static str,
    pub boss: BossTemplate,
    pub monsters: [&'static str; 3],
}

impl LevelTheme {
    /// 解析主题的怪物池
    pub fn monster_pool(&self) -> Vec<&'static MonsterTemplate> {
        self.monsters
            .iter()
            .filter_map(|name| monster_by_name(name))
            .collect()
    }
}

pub fn monster_by_name(name: &str) -> Option<&'static MonsterTemplate> {
    MONSTERS.iter().find(|m| m.name == name)
}

macro_rules! monster {
    ($name:expr, $image:expr, $min:expr, $max:expr, $factor:expr, $class:ident) => {
        MonsterTemplate {
            name: $name,
            image: concat!("images/monsters/", $image, ".png"),
            damage_min: $min,
            damage_max: $max,
            depth_factor: $factor,
            class: Class::$class,
            flavor: None,
        }
    };
    ($name:expr, $image:expr, $min:expr, $max:expr, $factor:expr, $class:ident, $flavor:expr) => {
        MonsterTemplate {
            name: $name,
            image: concat!("images/monsters/", $image, ".png"),
            damage_min: $min,
            damage_max: $max,
            depth_factor: $factor,
            class: Class::$class,
            flavor: Some($flavor),
        }
    };
}

pub static MONSTERS: [MonsterTemplate; 23] = [
    monster!("Goblin", "goblin", 3, 7, 1.0, Rogue),
    monster!("Skeleton", "skeleton", 4, 8, 1.0, Warrior),
    monster!("Slime", "slime", 2, 6, 1.0, Mage),
    monster!("Giant Spider", "giant_spider", 5, 9, 1.2, Rogue),
    monster!("Cave Bat", "cave_bat", 2, 5, 0.8, Rogue),
    monster!("Zombie", "zombie", 6, 10, 1.2, Warrior),
    monster!("Restless Ghost", "restless_ghost", 4, 7, 1.0, Mage),
    monster!("Impish Demon", "impish_demon", 7, 12, 1.5, Mage),
    monster!("Young Dragon", "young_dragon", 10, 15, 2.0, Warrior),
    monster!("Dire Wolf", "dire_wolf", 5, 9, 1.1, Warrior),
    monster!("Manticore", "manticore", 8, 13, 1.4, Rogue, "Its barbed tail rattles as it circles."),
    monster!("Chimera", "chimera", 9, 14, 1.8, Warrior, "Three heads, one intent: your demise."),
    monster!("Cyclops", "cyclops", 7, 12, 1.5, Warrior, "It bellows and charges, single eye blazing."),
    monster!("Fishman", "fishman", 3, 7, 1.0, Rogue, "Wet footprints slosh closer from the dark."),
    monster!("Golem", "golem", 6, 11, 1.6, Warrior, "Stone grinds as it lumbers forward."),
    monster!("Lizard", "lizard", 2, 6, 0.9, Rogue, "It darts side to side with a hiss."),
    monster!("Lizardman", "lizardman", 4, 8, 1.1, Warrior, "A spear-wielding raider flicks its tongue."),
    monster!("Troll", "troll", 5, 9, 1.2, Warrior, "A foul roar echoes through the corridor."),
    monster!("Wraith", "wraith", 4, 10, 1.3, Mage, "The air turns thin and icy as it drifts closer."),
    monster!("Minotaur", "minotaur", 10, 16, 1.9, Warrior, "The ground shakes with each thunderous hoofbeat."),
    monster!("Ogre", "ogre", 8, 13, 1.5, Warrior, "It hefts a massive club with terrifying ease."),
    monster!("Orc", "orc", 5, 10, 1.2, Rogue, "It snarls and beats its chest, eager for a fight."),
    monster!("Snake", "snake", 2, 5, 0.8, Rogue, "It coils and strikes with lightning speed."),
];

pub static TREASURES: [TreasureTemplate; 5] = [
    TreasureTemplate {
        name: "Pile of Gold",
        image: "images/treasures/gold_pile.png",
        value_min: 10,
        value_max: 30,
        depth_value_factor: 5,
    },
    TreasureTemplate {
        name: "Sparkling Gem",
        image: "images/treasures/gem.png",
        value_min: 25,
        value_max: 50,
        depth_value_factor: 8,
    },
    TreasureTemplate {
        name: "Loot Chest",
        image: "images/treasures/loot_chest.png",
        value_min: 50,
        value_max: 100,
        depth_value_factor: 12,
    },
    TreasureTemplate {
        name: "Ancient Scroll",
        image: "images/treasures/ancient_scroll.png",
        value_min: 15,
        value_max: 40,
        depth_value_factor: 6,
    },
    TreasureTemplate {
        name: "Valuable Potion",
        image: "images/treasures/valuable_potion.png",
        value_min: 20,
        value_max: 45,
        depth_value_factor: 7,
    },
];

macro_rules! theme {
    ($title:expr, $boss:expr, $n:literal, $class:ident, $flavor:expr, [$a:expr, $b:expr, $c:expr]) => {
        LevelTheme {
            title: $title,
            boss: BossTemplate {
                name: $boss,
                image: concat!("images/monsters/boss", $n, ".png"),
                class: Class::$class,
                flavor: $flavor,
            },
            monsters: [$a, $b, $c],
        }
    };
}

/// 关卡主题表，每局会被打乱顺序
pub static LEVEL_THEMES: [LevelTheme; 10] = [
    theme!("Goblin Warrens", "Goblin Warlord", 1, Rogue,
        "A crown of bent nails glints above a toothy grin.",
        ["Goblin", "Orc", "Cave Bat"]),
    theme!("Ossuary", "Bone Lich", 2, Mage,
        "Green fire burns in its hollow sockets.",
        ["Skeleton", "Restless Ghost", "Zombie"]),
    theme!("Menagerie", "The Beastmaster", 3, Warrior,
        "A whip cracks and every cage door swings open.",
        ["Chimera", "Cyclops", "Manticore"]),
    theme!("Troll Bridge", "Ogre Chieftain", 4, Warrior,
        "It drags a tree trunk behind it like a toy.",
        ["Troll", "Ogre", "Dire Wolf"]),
    theme!("Flooded Halls", "Sunken Hydra", 5, Rogue,
        "Five heads rise from the black water at once.",
        ["Lizard", "Lizardman", "Fishman"]),
    theme!("Foundry", "Forge Colossus", 6, Warrior,
        "Molten slag drips from its iron joints.",
        ["Golem", "Impish Demon", "Slime"]),
    theme!("Webbed Vault", "Spider Queen", 7, Rogue,
        "Countless eyes glitter in the silk canopy above.",
        ["Giant Spider", "Wraith", "Cave Bat"]),
    theme!("Serpent Temple", "Serpent Empress", 8, Mage,
        "Her hiss shapes words of an ancient spell.",
        ["Snake", "Young Dragon", "Lizardman"]),
    theme!("Labyrinth", "Labyrinth King", 9, Warrior,
        "Horns scrape the ceiling as it lowers its head.",
        ["Minotaur", "Cyclops", "Dire Wolf"]),
    theme!("Dragon's Hoard", "Elder Dragon", 10, Mage,
        "Heat rolls off its scales in shimmering waves.",
        ["Young Dragon", "Impish Demon", "Wraith"]),
];

/// 普通怪物登场时的通用描述
pub static MONSTER_INTRO_LINES: [&str; 4] = [
    "It's preparing its moves...",
    "It sizes you up, plotting its attack...",
    "It circles you, waiting for an opening...",
    "It growls and readies a flurry of blows...",
];

/// 陷阱出现时的通用描述
pub static TRAP_INTRO_LINES: [&str; 3] = [
    "The mechanism clicks into motion...",
    "You spot the trigger a moment too late...",
    "Gears grind somewhere behind the walls...",
];
