mod order;
mod set;
mod targets;

pub use order::cmd_order;
pub use set::cmd_set;
pub use targets::cmd_targets;

use stackup_lib::target::Target;

use crate::output::{print_stat, print_warning, symbols};

/// JSON description of one target.
fn target_json(target: &Target<'_>) -> serde_json::Value {
  serde_json::json!({
    "name": target.name(),
    "key": target.key,
    "dir": target.dir,
    "declared": target.entry.is_some(),
    "mem": target.entry.map(|entry| entry.mem()),
    "instances": target.entry.map(|entry| entry.instances()),
  })
}

/// Print one target as a numbered block.
fn print_target(position: usize, target: &Target<'_>) {
  println!("{}. {} {}", position, symbols::ARROW, target.display_name());
  if let Some(key) = target.key {
    print_stat("Key", key);
  }
  print_stat("Directory", &target.dir.display().to_string());
  match target.entry {
    Some(entry) => {
      print_stat("Memory", entry.mem());
      print_stat("Instances", &entry.instances().to_string());
    }
    None => print_warning(&format!("{} is not declared in the manifest", target.display_name())),
  }
}
