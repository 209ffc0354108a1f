use crate::model::{Ensure, VlanDesiredState, VlanState};

/// Commands moving VLAN `id` from `current` to `desired`.
///
/// The VLAN's textual name comes from `description`, or from `name` when
/// the caller set it to something other than the id. `vlan <id>` always
/// precedes `name <value>`.
pub fn plan_vlan_update(id: &str, current: &VlanState, desired: &VlanDesiredState) -> Vec<String> {
    let mut commands = Vec::new();

    match desired.ensure {
        Ensure::Absent => {
            if current.ensure == Ensure::Present {
                commands.push(format!("no vlan {id}"));
            }
        }
        Ensure::Present => {
            commands.push(format!("vlan {id}"));

            let target = desired
                .description
                .as_deref()
                .or(desired.name.as_deref().filter(|name| *name != id));
            if let Some(target) = target {
                if current.name.as_deref() != Some(target) {
                    commands.push(format!("name {target}"));
                }
            }
        }
    }

    commands
}
