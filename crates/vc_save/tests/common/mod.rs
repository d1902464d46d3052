#![allow(dead_code, reason = "each test binary uses a part of the fixtures")]

use std::sync::Arc;

use vc_reflect::derive::Reflect;
use vc_reflect::{Reflect, SaveHooks, impl_reflect_dyn};
use vc_save::SaveSystem;
use vc_task::TaskPool;

// -----------------------------------------------------------------------------
// Animals

pub trait Animal: Reflect {
    fn name(&self) -> &str;
}

impl_reflect_dyn!(Animal);

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "zoo::mammals::Dog", module = "zoo_data", implements(Animal))]
pub struct Dog {
    pub name: String,
    pub good: bool,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "zoo::mammals::Cat", module = "zoo_data", implements(Animal))]
pub struct Cat {
    pub name: String,
    pub lives: u8,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "zoo::birds::Parrot", module = "zoo_data", implements(Animal))]
pub struct Parrot {
    pub name: String,
    pub words: Vec<String>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "zoo::Creature", module = "zoo_data", implements(Animal))]
pub struct Creature {
    pub name: String,
}

impl Animal for Dog {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Animal for Cat {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Animal for Parrot {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Animal for Creature {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Reflect, Default)]
#[reflect(type_path = "zoo::Zoo", module = "zoo_data")]
pub struct Zoo {
    pub name: String,
    pub animals: Vec<Box<dyn Animal>>,
}

/// Lives in another module, its qualifier is a wrong one for animals.
#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "staff::Keeper", module = "zoo_extra")]
pub struct Keeper {
    pub name: String,
}

pub fn downcast<T: Reflect>(animal: &dyn Animal) -> Option<&T> {
    let animal: &dyn Reflect = animal;
    animal.downcast_ref::<T>()
}

// -----------------------------------------------------------------------------
// Parts

pub trait Part: Reflect {
    fn weight(&self) -> u32;
}

impl_reflect_dyn!(Part);

#[derive(Reflect, Default)]
#[reflect(type_path = "shop::Group", module = "shop_data", implements(Part))]
pub struct Group {
    pub name: String,
    pub parts: Vec<Box<dyn Part>>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "shop::Leaf", module = "shop_data", implements(Part))]
pub struct Leaf {
    pub name: String,
    pub weight: u32,
}

impl Part for Group {
    fn weight(&self) -> u32 {
        self.parts.iter().map(|part| part.weight()).sum()
    }
}

impl Part for Leaf {
    fn weight(&self) -> u32 {
        self.weight
    }
}

pub fn group(name: &str, parts: Vec<Box<dyn Part>>) -> Box<dyn Part> {
    Box::new(Group {
        name: name.into(),
        parts,
    })
}

pub fn leaf(name: &str, weight: u32) -> Box<dyn Part> {
    Box::new(Leaf {
        name: name.into(),
        weight,
    })
}

// -----------------------------------------------------------------------------
// Hooks

#[derive(Reflect, Default, Debug)]
#[reflect(hooks)]
pub struct Journal {
    pub entries: Vec<String>,
    pub entry_count: u32,
    #[reflect(exclude)]
    pub prepare_calls: u32,
    #[reflect(exclude)]
    pub post_load_calls: u32,
    #[reflect(exclude)]
    pub loaded_path: String,
    #[reflect(exclude)]
    pub loaded_name: String,
}

impl SaveHooks for Journal {
    fn prepare_save(&mut self) {
        self.prepare_calls += 1;
        self.entry_count = self.entries.len() as u32;
    }

    fn post_load(&mut self, full_path: &str, file_name: &str) {
        self.post_load_calls += 1;
        self.loaded_path = full_path.to_owned();
        self.loaded_name = file_name.to_owned();
    }
}

// -----------------------------------------------------------------------------
// Inclusion

#[derive(Reflect, Default, Debug, PartialEq)]
pub struct Profile {
    pub name: String,
    pub level: u32,
    #[reflect(exclude)]
    pub session: String,
    #[reflect(include, rename = "pin")]
    pin_code: u16,
    scratch: u64,
}

impl Profile {
    pub fn new(name: &str, level: u32, pin_code: u16) -> Self {
        Self {
            name: name.into(),
            level,
            pin_code,
            ..Self::default()
        }
    }

    pub fn pin_code(&self) -> u16 {
        self.pin_code
    }

    pub fn scratch(&self) -> u64 {
        self.scratch
    }

    pub fn set_scratch(&mut self, scratch: u64) {
        self.scratch = scratch;
    }
}

// -----------------------------------------------------------------------------
// System

pub fn system_with(builder: vc_save::SaveSystemBuilder) -> SaveSystem {
    let system = builder
        .task_pool(Arc::new(TaskPool::builder().thread_num(2).build()))
        .build();

    system.register::<Zoo>();
    system.register::<Dog>();
    system.register::<Cat>();
    system.register::<Parrot>();
    system.register::<Creature>();
    system.register::<Keeper>();
    system.register::<Group>();
    system.register::<Leaf>();
    system.register::<Journal>();
    system.register::<Profile>();
    system
}

pub fn system() -> SaveSystem {
    system_with(SaveSystem::builder())
}
