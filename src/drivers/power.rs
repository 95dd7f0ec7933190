// Power domains: LDO rails and the modem supply FET
//
// Each domain is an enable GPIO. Users request/release a domain; the rail
// switches on at the first request and off at the last release.
// One instance per board, built by the boot sequence and passed by
// reference to whoever needs it.

use core::fmt;

use embedded_hal::digital::OutputPin;
use log::debug;

pub const DOMAIN_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerDomain {
    Ldo2 = 0,
    Ldo3 = 1,
    Ldo4 = 2,
    /// GSM module battery supply FET.
    Gsm = 3,
}

impl PowerDomain {
    pub const ALL: [PowerDomain; DOMAIN_COUNT] = [
        PowerDomain::Ldo2,
        PowerDomain::Ldo3,
        PowerDomain::Ldo4,
        PowerDomain::Gsm,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            PowerDomain::Ldo2 => "LDO2",
            PowerDomain::Ldo3 => "LDO3",
            PowerDomain::Ldo4 => "LDO4",
            PowerDomain::Gsm => "GSM",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for PowerDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerError {
    /// release() without a matching request()
    NotRequested(PowerDomain),
    /// The enable pin could not be driven.
    Switch(PowerDomain),
}

impl fmt::Display for PowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerError::NotRequested(d) => write!(f, "{} released but never requested", d),
            PowerError::Switch(d) => write!(f, "{} enable pin write failed", d),
        }
    }
}

pub struct PowerManager<P> {
    // indexed by PowerDomain, same order as PowerDomain::ALL
    switches: [P; DOMAIN_COUNT],
    users: [u8; DOMAIN_COUNT],
}

impl<P: OutputPin> PowerManager<P> {
    /// Takes the enable pins in `PowerDomain::ALL` order. Pins are expected
    /// to be configured low (all domains off).
    pub const fn new(switches: [P; DOMAIN_COUNT]) -> Self {
        Self {
            switches,
            users: [0; DOMAIN_COUNT],
        }
    }

    pub fn request(&mut self, domain: PowerDomain) -> Result<(), PowerError> {
        let i = domain.index();
        if self.users[i] == 0 {
            self.switches[i]
                .set_high()
                .map_err(|_| PowerError::Switch(domain))?;
            debug!("power: {} on", domain);
        }
        self.users[i] = self.users[i].saturating_add(1);
        Ok(())
    }

    pub fn release(&mut self, domain: PowerDomain) -> Result<(), PowerError> {
        let i = domain.index();
        match self.users[i] {
            0 => Err(PowerError::NotRequested(domain)),
            1 => {
                self.switches[i]
                    .set_low()
                    .map_err(|_| PowerError::Switch(domain))?;
                debug!("power: {} off", domain);
                self.users[i] = 0;
                Ok(())
            }
            _ => {
                self.users[i] -= 1;
                Ok(())
            }
        }
    }

    pub fn is_enabled(&self, domain: PowerDomain) -> bool {
        self.users[domain.index()] > 0
    }

    pub fn users(&self, domain: PowerDomain) -> u8 {
        self.users[domain.index()]
    }
}

impl<P> fmt::Display for PowerManager<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, domain) in PowerDomain::ALL.iter().enumerate() {
            if n > 0 {
                f.write_str(" ")?;
            }
            let users = self.users[domain.index()];
            if users > 0 {
                write!(f, "{}=on({})", domain, users)?;
            } else {
                write!(f, "{}=off", domain)?;
            }
        }
        Ok(())
    }
}
