pub mod damage;

pub use damage::{hit_for_roll, resolve_damage, resolve_hit, Hit};
