#[cfg(test)]
pub mod test {
    use std::time::Duration;

    /// A config file exercising comments, a section, and a duration.
    pub const TEST_INI: &str = "debug = true
count = 65535
; comment
# another comment
TTL=30m

[Nested1]
A = sometag
";

    #[derive(Debug, Clone, PartialEq)]
    pub struct TestConfig {
        pub debug: bool,
        pub count: i32,
        pub nested1: Nested1,
        pub nested2: Nested2,
        pub count2: i64,
        pub ttl: Duration,
    }
    crate::record!(TestConfig {
        field debug,
        field count: "number of items",
        group nested1,
        group nested2,
        field count2,
        field ttl,
    });

    #[derive(Debug, Clone, PartialEq)]
    pub struct Nested1 {
        pub a: String,
        pub b: String,
        /// Not listed in the record table, so never configurable.
        pub ignored: i32,
    }
    crate::record!(Nested1 { field a, field b });

    #[derive(Debug, Clone, PartialEq)]
    pub struct Nested2 {
        pub zzz: bool,
    }
    crate::record!(Nested2 { field zzz });

    pub fn test_config() -> TestConfig {
        TestConfig {
            debug: false,
            count: 42,
            nested1: Nested1 {
                a: String::new(),
                b: "baa".into(),
                ignored: 7,
            },
            nested2: Nested2 { zzz: false },
            count2: 0,
            ttl: Duration::from_secs(1),
        }
    }

    // -- Fixture for schema errors ----------------------------------------------

    #[derive(Debug, Default)]
    pub struct UnsupportedConfig {
        pub name: String,
        pub port: u16,
    }
    crate::record!(UnsupportedConfig { field name, field port });

    // -- Fixture for list-valued fields -----------------------------------------

    #[derive(Debug, Default, PartialEq)]
    pub struct ListConfig {
        pub ports: Vec<i64>,
        pub ratios: Vec<f64>,
        pub tags: Vec<String>,
        pub rate: f64,
    }
    crate::record!(ListConfig {
        field ports: "ports to listen on",
        field ratios,
        field tags,
        field rate,
    });

    #[test]
    fn test_config_defaults() {
        let config = test_config();
        assert!(!config.debug);
        assert_eq!(config.count, 42);
        assert_eq!(config.nested1.b, "baa");
        assert_eq!(config.ttl, Duration::from_secs(1));
    }
}
