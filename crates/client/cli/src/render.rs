//! Plain-text rendering for the terminal.

use combat_core::{SessionPhase, SessionSnapshot, ShopItem};

pub fn lines(lines: impl IntoIterator<Item = String>) {
    for line in lines {
        println!("  {line}");
    }
}

pub fn status(view: &SessionSnapshot) {
    let player = &view.player;
    let enemy = &view.enemy;
    println!();
    println!(
        "[{}] {} {}/{} hp  vs  {} {}/{} hp  ({} more here, {} regions after)",
        view.region,
        player.name,
        player.hp,
        player.hp_max,
        enemy.name,
        enemy.hp,
        enemy.hp_max,
        view.enemies_remaining,
        view.regions_remaining,
    );
}

pub fn prompt(view: &SessionSnapshot) {
    match view.phase {
        SessionPhase::AdvancingRegion => {
            println!("shop> buy <item> | use <item> | [enter] next region | quit");
        }
        _ => {
            let choices = view
                .player
                .attacks
                .iter()
                .enumerate()
                .map(|(index, attack)| format!("{}) {}", index + 1, attack.name))
                .collect::<Vec<_>>()
                .join("  ");
            println!("{choices}  | quit");
        }
    }
}

pub fn help(view: &SessionSnapshot) {
    if view.phase == SessionPhase::AdvancingRegion {
        println!("  buy <id>   spend gold on an item");
        println!("  use <id>   use an owned item");
        println!("  continue   leave the shop (or just press enter)");
    } else {
        println!("  <n> or <attack name>   attack");
        for attack in &view.player.attacks {
            println!(
                "    {} ({} base, {})",
                attack.name, attack.base_damage, attack.damage_type
            );
        }
    }
    println!("  quit       abandon the run");
}

pub fn shop(items: &[ShopItem], balance: u64, inventory: &[String]) {
    println!();
    println!("== Shop ==  balance: {balance} gold");
    for item in items {
        let marker = if item.price > balance { " " } else { "*" };
        println!(
            " {marker} {:<14} {:>5}g  {}",
            item.id, item.price, item.description
        );
    }
    if !inventory.is_empty() {
        println!("  owned: {}", inventory.join(", "));
    }
}
