//! Registry of activatable backends

use crate::build_configuration::BuildConfigurationBuilder;
use crate::error::Result;
use pants_options::{GlobalOptions, OptionSpec, ScopeInfo, Subsystem};
use std::collections::HashMap;
use std::sync::Arc;

pub const CORE_BACKEND: &str = "pants.core";
pub const PYTHON_BACKEND: &str = "pants.backend.python";
pub const PROTOBUF_JAVA_BACKEND: &str = "pants.backend.codegen.protobuf.java";

/// Registers a backend's target types and optionables.
pub type RegisterFn = fn(&mut BuildConfigurationBuilder) -> Result<()>;

/// A named unit of functionality.
#[derive(Debug, Clone)]
pub struct Backend {
    pub name: String,
    pub description: String,
    register: RegisterFn,
}

impl Backend {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        register: RegisterFn,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            register,
        }
    }

    pub fn register(&self, builder: &mut BuildConfigurationBuilder) -> Result<()> {
        (self.register)(builder)
    }
}

/// Backends that can be named in `backend_packages` or as plugin entry
/// points.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    backends: HashMap<String, Backend>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// A registry with the built-in backends.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Backend::new(
            CORE_BACKEND,
            "Global options and the core goals.",
            register_core,
        ));
        registry.register(Backend::new(
            PYTHON_BACKEND,
            "Python libraries, tests and binaries.",
            register_python,
        ));
        registry.register(Backend::new(
            PROTOBUF_JAVA_BACKEND,
            "Java code generated from Protocol Buffers.",
            register_protobuf_java,
        ));
        registry
    }

    /// Add a backend, replacing any backend with the same name.
    pub fn register(&mut self, backend: Backend) {
        self.backends.insert(backend.name.clone(), backend);
    }

    pub fn get(&self, name: &str) -> Option<&Backend> {
        self.backends.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// Backend names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.backends.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}

fn register_core(builder: &mut BuildConfigurationBuilder) -> Result<()> {
    builder.register_optionable(Arc::new(GlobalOptions))?;

    let goals = [
        ScopeInfo::goal("help", "Display usage message."),
        ScopeInfo::goal("list", "Lists all targets matching the target specs.")
            .with_option(
                OptionSpec::bool("documented", false)
                    .with_help("Print only targets that are documented."),
            ),
        ScopeInfo::goal("test", "Run tests.")
            .with_option(
                OptionSpec::bool("debug", false)
                    .with_help("Run a single test target interactively."),
            )
            .with_option(
                OptionSpec::bool("force", false)
                    .with_help("Force the tests to run, even if they could be satisfied from cache."),
            ),
        ScopeInfo::goal("lint", "Run all linters.")
            .with_option(OptionSpec::bool("per-target-caching", false)),
        ScopeInfo::goal("fmt", "Autoformat source code."),
        ScopeInfo::new("source", "Configuration for roots of source trees.")
            .with_option(OptionSpec::list("root-patterns", ["/", "src", "src/python"])),
    ];
    for info in goals {
        builder.register_optionable(Arc::new(Subsystem::new(info)))?;
    }

    builder.register_target_type("target", "A generic target with no specific type.")?;
    builder.register_target_type("files", "A collection of loose files.")?;
    builder.register_target_type(
        "resources",
        "Data embedded in a code package and accessed in a location-independent manner.",
    )?;
    Ok(())
}

fn register_python(builder: &mut BuildConfigurationBuilder) -> Result<()> {
    builder.register_optionable(Arc::new(Subsystem::new(
        ScopeInfo::new("python-setup", "A Python environment.")
            .with_option(OptionSpec::list("interpreter-constraints", ["CPython>=3.6"]))
            .with_option(OptionSpec::bool("resolve-all-constraints", true)),
    )))?;
    builder.register_optionable(Arc::new(Subsystem::new(
        ScopeInfo::new("pytest", "The pytest Python test framework.")
            .with_option(OptionSpec::string("version", "pytest>=5.3.5,<5.4"))
            .with_option(OptionSpec::list("args", Vec::<String>::new())),
    )))?;
    builder.register_optionable(Arc::new(Subsystem::new(
        ScopeInfo::goal("repl", "Open a REPL with the specified code loadable."),
    )))?;

    builder.register_target_type("python_library", "A Python library.")?;
    builder.register_target_type("python_tests", "Python tests.")?;
    builder.register_target_type("python_binary", "A Python binary.")?;
    builder.register_target_type("python_requirement_library", "A set of pip requirements.")?;
    Ok(())
}

fn register_protobuf_java(builder: &mut BuildConfigurationBuilder) -> Result<()> {
    builder.register_optionable(Arc::new(Subsystem::new(
        ScopeInfo::new("protoc", "The protocol buffer compiler.")
            .with_option(OptionSpec::string("version", "3.11.4")),
    )))?;
    builder.register_target_type(
        "java_protobuf_library",
        "A Java library generated from Protocol Buffer IDL files.",
    )?;
    Ok(())
}
