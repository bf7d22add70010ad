//! Chat-command adapter: free-text commands in, reply strings out.
//!
//! Platform bindings (Discord, Slack, an IRC bridge) stay outside this
//! crate; the adapter only needs the command text, the author's name, and
//! whether the caller is privileged. Argument parsing and reply rendering
//! live here, outside the allocation core's test surface.

use std::collections::HashMap;

use roster_grid::{GridError, LANES_PER_TEAM, TEAMS};

use crate::service::AllocationService;

/// Parses `--key value` pairs out of a command tail.
///
/// A `--flag` followed by another `--key` or by nothing becomes `"true"`.
/// Bare words outside any `--key` are ignored.
pub fn parse_args(input: &str) -> HashMap<String, String> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let mut args = HashMap::new();
    let mut i = 0;
    while i < parts.len() {
        if let Some(key) = parts[i].strip_prefix("--") {
            match parts.get(i + 1) {
                Some(value) if !value.starts_with("--") => {
                    args.insert(key.to_string(), (*value).to_string());
                    i += 2;
                }
                _ => {
                    args.insert(key.to_string(), "true".to_string());
                    i += 1;
                }
            }
        } else {
            i += 1;
        }
    }
    args
}

/// Routes chat commands to the allocation service and renders replies.
pub struct CommandRouter<'a> {
    service: &'a AllocationService,
}

impl<'a> CommandRouter<'a> {
    pub fn new(service: &'a AllocationService) -> Self {
        Self { service }
    }

    /// Parses and executes one command line.
    ///
    /// `author` is used as the target member unless `--member` names
    /// someone else, which requires `is_admin`.
    pub fn dispatch(&self, command: &str, author: &str, is_admin: bool) -> String {
        let trimmed = command.trim();
        if trimmed.is_empty() {
            return "Please provide a command.".to_string();
        }
        let (name, rest) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));

        match name.to_lowercase().as_str() {
            "assign" => self.handle_assign(&parse_args(rest), author, is_admin),
            "remove" => self.handle_remove(&parse_args(rest), author, is_admin),
            "list" => self.handle_list(),
            other => format!(
                "Unknown command: {other}. Available commands: assign, remove, list"
            ),
        }
    }

    fn handle_assign(
        &self,
        args: &HashMap<String, String>,
        author: &str,
        is_admin: bool,
    ) -> String {
        if args.contains_key("member") && !is_admin {
            return "Only admins can assign other members.".to_string();
        }
        let member = args.get("member").map(String::as_str).unwrap_or(author);

        if args.contains_key("any-empty") || args.contains_key("random") {
            return match self.service.assign_any_free(member) {
                Some(slot) => format!(
                    "Successfully assigned {member} to Team {} Lane {}",
                    slot.team(),
                    slot.lane()
                ),
                None => "No empty lanes available.".to_string(),
            };
        }

        let (Some(team), Some(lane)) = (args.get("team"), args.get("lane")) else {
            return "Invalid assign command. Use --team and --lane to specify a lane, \
                    or --any-empty to assign to any empty lane."
                .to_string();
        };
        let (Ok(team), Ok(lane)) = (team.parse::<i64>(), lane.parse::<i64>()) else {
            return "Team and lane numbers must be integers.".to_string();
        };

        match self.service.assign_to_slot(member, team, lane) {
            Ok((true, _)) => {
                format!("Successfully assigned {member} to Team {team}, Lane {lane}.")
            }
            Ok((false, Some(slot))) => format!(
                "Lane taken. Suggested: Team {} Lane {}",
                slot.team(),
                slot.lane()
            ),
            Ok((false, None)) => "All lanes are full.".to_string(),
            Err(GridError::TeamOutOfRange { got }) => {
                format!("Team {got} does not exist. Teams are numbered 1-{TEAMS}.")
            }
            Err(GridError::LaneOutOfRange { got }) => {
                format!("Lane {got} does not exist. Lanes are numbered 1-{LANES_PER_TEAM}.")
            }
        }
    }

    fn handle_remove(
        &self,
        args: &HashMap<String, String>,
        author: &str,
        is_admin: bool,
    ) -> String {
        if args.contains_key("member") && !is_admin {
            return "Only admins can remove other members.".to_string();
        }
        let member = args.get("member").map(String::as_str).unwrap_or(author);

        if self.service.remove(member) {
            format!("Removed {member} from lane.")
        } else {
            format!("{member} is not assigned to any lanes.")
        }
    }

    fn handle_list(&self) -> String {
        if self.service.list_all().is_empty() {
            return "No teams found.".to_string();
        }

        let status = self.service.team_status();
        let mut output = vec!["**Current Team Assignments:**".to_string()];
        for (team, lanes) in &status {
            output.push(format!("**Team {team}**"));
            let filled = lanes.values().filter(|member| member.is_some()).count();
            output.push(format!("{filled}/{LANES_PER_TEAM} lanes filled"));
            for (lane, member) in lanes {
                output.push(format!(
                    "Lane {lane}: {}",
                    member.as_deref().unwrap_or("Empty")
                ));
            }
            output.push(String::new());
        }
        output.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::store::OccupancyStore;

    #[fixture]
    fn service() -> AllocationService {
        AllocationService::new(OccupancyStore::new())
    }

    #[test]
    fn test_parse_args_key_value_pairs() {
        let args = parse_args("--team 1 --lane 3");
        assert_eq!(args["team"], "1");
        assert_eq!(args["lane"], "3");
    }

    #[test]
    fn test_parse_args_bare_flag_is_true() {
        let args = parse_args("--random --member alice");
        assert_eq!(args["random"], "true");
        assert_eq!(args["member"], "alice");
    }

    #[test]
    fn test_parse_args_trailing_flag_and_noise() {
        let args = parse_args("something --team 2 --any-empty");
        assert_eq!(args.len(), 2);
        assert_eq!(args["team"], "2");
        assert_eq!(args["any-empty"], "true");
    }

    #[rstest]
    fn test_dispatch_empty_and_unknown(service: AllocationService) {
        let router = CommandRouter::new(&service);
        assert_eq!(router.dispatch("  ", "alice", false), "Please provide a command.");
        assert_eq!(
            router.dispatch("promote --member bob", "alice", true),
            "Unknown command: promote. Available commands: assign, remove, list"
        );
    }

    #[rstest]
    fn test_assign_self_to_lane(service: AllocationService) {
        let router = CommandRouter::new(&service);
        let reply = router.dispatch("assign --team 1 --lane 3", "alice", false);
        assert_eq!(reply, "Successfully assigned alice to Team 1, Lane 3.");
    }

    #[rstest]
    fn test_assign_other_member_requires_admin(service: AllocationService) {
        let router = CommandRouter::new(&service);
        let reply = router.dispatch("assign --member bob --team 1 --lane 1", "alice", false);
        assert_eq!(reply, "Only admins can assign other members.");
        assert_eq!(service.occupied(), 0);

        let reply = router.dispatch("assign --member bob --team 1 --lane 1", "alice", true);
        assert_eq!(reply, "Successfully assigned bob to Team 1, Lane 1.");
    }

    #[rstest]
    fn test_assign_taken_lane_suggests(service: AllocationService) {
        let router = CommandRouter::new(&service);
        router.dispatch("assign --team 1 --lane 3", "alice", false);
        let reply = router.dispatch("assign --team 1 --lane 3", "bob", false);
        assert_eq!(reply, "Lane taken. Suggested: Team 1 Lane 1");
    }

    #[rstest]
    fn test_assign_full_grid(service: AllocationService) {
        for team in 1..=3 {
            for lane in 1..=8 {
                service
                    .assign_to_slot(&format!("user{team}_{lane}"), team, lane)
                    .unwrap();
            }
        }
        let router = CommandRouter::new(&service);
        let reply = router.dispatch("assign --team 2 --lane 5", "carl", false);
        assert_eq!(reply, "All lanes are full.");
    }

    #[rstest]
    fn test_assign_random(service: AllocationService) {
        let router = CommandRouter::new(&service);
        let reply = router.dispatch("assign --random", "alice", false);
        assert_eq!(reply, "Successfully assigned alice to Team 1 Lane 1");
    }

    #[rstest]
    fn test_assign_rejects_out_of_range(service: AllocationService) {
        let router = CommandRouter::new(&service);
        assert_eq!(
            router.dispatch("assign --team 10 --lane 3", "alice", false),
            "Team 10 does not exist. Teams are numbered 1-3."
        );
        assert_eq!(
            router.dispatch("assign --team 1 --lane 15", "alice", false),
            "Lane 15 does not exist. Lanes are numbered 1-8."
        );
        assert_eq!(service.occupied(), 0);
    }

    #[rstest]
    fn test_assign_rejects_non_numeric(service: AllocationService) {
        let router = CommandRouter::new(&service);
        assert_eq!(
            router.dispatch("assign --team one --lane 3", "alice", false),
            "Team and lane numbers must be integers."
        );
    }

    #[rstest]
    fn test_assign_without_coordinates(service: AllocationService) {
        let router = CommandRouter::new(&service);
        let reply = router.dispatch("assign --team 1", "alice", false);
        assert!(reply.starts_with("Invalid assign command."));
    }

    #[rstest]
    fn test_remove(service: AllocationService) {
        let router = CommandRouter::new(&service);
        router.dispatch("assign --team 1 --lane 3", "alice", false);

        assert_eq!(
            router.dispatch("remove --member alice", "bob", false),
            "Only admins can remove other members."
        );
        assert_eq!(
            router.dispatch("remove", "alice", false),
            "Removed alice from lane."
        );
        assert_eq!(
            router.dispatch("remove", "alice", false),
            "alice is not assigned to any lanes."
        );
    }

    #[rstest]
    fn test_list_empty(service: AllocationService) {
        let router = CommandRouter::new(&service);
        assert_eq!(router.dispatch("list", "alice", false), "No teams found.");
    }

    #[rstest]
    fn test_list_renders_grid(service: AllocationService) {
        let router = CommandRouter::new(&service);
        router.dispatch("assign --team 2 --lane 5", "alice", false);

        let reply = router.dispatch("list", "alice", false);
        assert!(reply.starts_with("**Current Team Assignments:**"));
        assert!(reply.contains("**Team 2**"));
        assert!(reply.contains("1/8 lanes filled"));
        assert!(reply.contains("Lane 5: alice"));
        assert!(reply.contains("Lane 1: Empty"));
    }
}
