//! Example: Building a tree in memory, editing it and encoding it
//!
//! Run with: cargo run --example build_tree

use nbtree::{BigEndian, Compound, List, Node, kind, read_slice};

fn main() -> nbtree::Result<()> {
    let mut pos = List::new();
    for coordinate in [12.5f64, 64.0, -203.25] {
        pos.push(coordinate)?;
    }

    let mut sword = Compound::new();
    sword.insert("id", "minecraft:diamond_sword")?;
    sword.insert("Count", 1i8)?;

    let mut inventory = List::new();
    inventory.push(sword)?;

    let mut player = Compound::new();
    player.insert("Pos", pos)?;
    player.insert("Inventory", inventory)?;
    player.insert("Health", 20.0f32)?;
    let mut root = Node::from(player);

    // Halve the health and stack the sword through mutable views.
    {
        let mut view = root.view_mut();
        if let Some(mut health) = view.get_mut("Health") {
            let current = health.as_float()?;
            health.replace(current / 2.0)?;
        }

        if let Some(mut inventory) = view.get_mut("Inventory") {
            if let Some(mut count) = inventory.get_mut(0usize).and_then(|item| item.into_mut("Count")) {
                *count.payload_mut::<kind::Byte>()? = 64;
            }
        }
    }

    let bytes = root.write_to_vec::<BigEndian>()?;
    println!("Encoded {} bytes", bytes.len());

    let decoded = read_slice::<BigEndian>(&bytes)?;
    assert_eq!(decoded, root);

    let view = decoded.view();
    if let Some(y) = view.path(["Pos"]).and_then(|pos| pos.get(1usize)) {
        println!("y = {}", y.as_double()?);
    }
    if let Some(health) = view.get("Health") {
        println!("health = {}", health.as_float()?);
    }
    Ok(())
}
