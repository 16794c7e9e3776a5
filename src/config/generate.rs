/// Starter configuration written by `cmx-anonymiser config init`.
pub fn generate_starter_config() -> String {
    r#"# =============================================================================
# CMX-ANONYMISER CONFIGURATION
# =============================================================================
# Polls a Cisco CMX appliance for client and access-point telemetry, replaces
# every client MAC address with a salted SHA-256 token, and writes each run as
# timestamped CSV snapshots.
#
# Config file locations (in order of precedence):
#   1. Path specified via --config argument
#   2. ~/.config/cmx-anonymiser/config.yml
#   3. /etc/cmx-anonymiser/config.yml
#
# Values support $env{VAR_NAME} expansion, useful for keeping the password
# and salt out of the file.

cmx:
  # Address of the CMX appliance (no scheme).
  host: 10.10.20.95
  # http or https. Certificate verification is disabled either way; CMX
  # appliances usually run self-signed certs.
  scheme: http
  username: learning
  password: $env{CMX_PASSWORD}
  # Per-attempt request timeout.
  timeout: 4s
  # Total network calls per fetch, including the first attempt.
  max_attempts: 5
  # Delay between failed attempts.
  retry_backoff: 3s
  # API paths, rarely need changing.
  clients_path: /api/location/v1/clients/
  aps_path: /api/config/v1/aps/

output:
  # CSV snapshots are written here, one file per kind per collection cycle.
  directory: ./output

schedule:
  # Collection runs at each time below, every day, for this many days
  # starting today. Times already in the past today are skipped.
  days: 5
  times: "9:00,12:00,15:00,18:00"
  # Use the literal "now" instead to run a single collection immediately:
  # times: now

privacy:
  # Secret mixed into every MAC hash. Keep it stable for linkable tokens
  # across runs; rotate it to sever the link.
  salt: $env{CMX_SALT}
"#
    .to_string()
}
