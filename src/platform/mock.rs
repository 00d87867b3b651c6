use std::cell::{Cell, RefCell};

use crate::error::Result;
use crate::platform::{CfOutput, CfRunner};

struct MockSpace {
    name: String,
    apps: String,
    services: String,
}

/// Scripted stand-in for the `cf` client, keeping a session flag and the
/// currently targeted space.
pub struct MockCf {
    authenticated: Cell<bool>,
    login_succeeds: bool,
    spaces: Vec<MockSpace>,
    target: RefCell<Option<String>>,
    pub calls: RefCell<Vec<String>>,
}

impl MockCf {
    pub fn new() -> Self {
        Self {
            authenticated: Cell::new(false),
            login_succeeds: false,
            spaces: Vec::new(),
            target: RefCell::new(None),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn logged_in(self) -> Self {
        self.authenticated.set(true);
        self
    }

    pub fn accepting_login(mut self) -> Self {
        self.login_succeeds = true;
        self
    }

    pub fn with_space(mut self, name: &str, apps: &str, services: &str) -> Self {
        self.spaces.push(MockSpace {
            name: name.to_string(),
            apps: apps.to_string(),
            services: services.to_string(),
        });
        self
    }

    pub fn called(&self, command: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == command)
    }

    fn targeted(&self) -> Option<&MockSpace> {
        let target = self.target.borrow();
        let name = target.as_deref()?;
        self.spaces.iter().find(|s| s.name == name)
    }

    fn login(&self) -> CfOutput {
        if self.login_succeeds {
            self.authenticated.set(true);
            ok("API endpoint: https://api.example.com\nAuthenticating...\nOK\n")
        } else {
            fail("Credentials were rejected, please try again.")
        }
    }
}

impl CfRunner for MockCf {
    fn run(&self, args: &[&str]) -> Result<CfOutput> {
        self.calls.borrow_mut().push(args.join(" "));

        if args.first() == Some(&"login") {
            return Ok(self.login());
        }
        if !self.authenticated.get() {
            return Ok(fail("Not logged in. Use 'cf login' to log in."));
        }

        let output = match args {
            ["target"] => ok("API endpoint: https://api.example.com\norg: acme\n"),
            ["target", "-s", name] => {
                if self.spaces.iter().any(|s| s.name == *name) {
                    *self.target.borrow_mut() = Some(name.to_string());
                    ok("API endpoint: https://api.example.com\n")
                } else {
                    fail(&format!("Space '{name}' not found."))
                }
            }
            ["spaces"] => {
                let mut out = String::from("Getting spaces in org acme as ops...\n\nname\n");
                for space in &self.spaces {
                    out.push_str(&space.name);
                    out.push('\n');
                }
                ok(&out)
            }
            ["apps"] => match self.targeted() {
                Some(space) => ok(&space.apps),
                None => fail("No space targeted"),
            },
            ["services"] => match self.targeted() {
                Some(space) => ok(&space.services),
                None => fail("No space targeted"),
            },
            _ => fail("Unknown command"),
        };
        Ok(output)
    }

    fn run_interactive(&self, args: &[&str]) -> Result<bool> {
        Ok(self.run(args)?.success)
    }
}

fn ok(stdout: &str) -> CfOutput {
    CfOutput {
        success: true,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

fn fail(stderr: &str) -> CfOutput {
    CfOutput {
        success: false,
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}
