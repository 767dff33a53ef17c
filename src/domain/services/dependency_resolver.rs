//! Dependency resolver
//!
//! Orders the source files of one output file so that every dependency
//! packaged in the same output precedes its dependents, and validates the
//! dependency edges that leave the package:
//! - cycles are reported but never followed twice, so resolution terminates
//! - a dependency owned by a package that is not built yet is a
//!   cross-package ordering problem
//! - a dependency owned by no package is either adopted into the current
//!   package or reported as unassigned
//!
//! The walk is a depth-first traversal with grey (`on_stack`) and black
//! (`placed`) sets. Files are visited in their listed order, which makes
//! the resulting order a stable topological sort.

use std::collections::HashSet;

use crate::domain::entities::{OutputId, SourceId};
use crate::error::{PackError, PackResult};

/// Graph access needed by the resolver
pub trait DependencyGraph {
    /// Logical path of a source file, for diagnostics
    fn source_name(&self, source: SourceId) -> String;

    /// Logical path of an output file, for diagnostics
    fn output_name(&self, output: OutputId) -> String;

    /// Output file the source is bound to
    fn owner(&self, source: SourceId) -> Option<OutputId>;

    /// Whether the output file was already built
    fn is_finished(&self, output: OutputId) -> bool;

    /// Dependencies of a source file (computed on demand)
    fn dependencies(&mut self, source: SourceId) -> PackResult<Vec<SourceId>>;

    /// Bind an unassigned source file to `output`
    fn adopt(&mut self, source: SourceId, output: OutputId) -> PackResult<()>;
}

/// Switches of the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    pub detect_cycles: bool,
    pub auto_adopt_unassigned: bool,
    /// Only meaningful when `auto_adopt_unassigned` is off
    pub error_on_unassigned: bool,
    pub enforce_cross_package_order: bool,
    pub reorder: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            detect_cycles: true,
            auto_adopt_unassigned: true,
            error_on_unassigned: true,
            enforce_cross_package_order: true,
            reorder: true,
        }
    }
}

/// Outcome of resolving one output file
#[derive(Debug, Default)]
pub struct Resolution {
    /// Dependencies-first order of the files belonging to the package
    pub order: Vec<SourceId>,
    /// Files bound to the package during resolution
    pub adopted: Vec<SourceId>,
    /// Problems found, in discovery order
    pub problems: Vec<PackError>,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyResolver {
    options: ResolverOptions,
}

impl DependencyResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Walk `sources` (the files listed in `output`, in order) and their dependencies.
    ///
    /// Errors returned here come from the graph itself (e.g. a visitor failing
    /// while computing dependencies); validation problems are collected in
    /// [`Resolution::problems`].
    pub fn resolve<G>(
        &self,
        graph: &mut G,
        output: OutputId,
        sources: &[SourceId],
    ) -> PackResult<Resolution>
    where
        G: DependencyGraph + ?Sized,
    {
        let mut walk = Walk {
            options: &self.options,
            graph,
            output,
            stack: Vec::new(),
            on_stack: HashSet::new(),
            placed: HashSet::new(),
            late_packages: HashSet::new(),
            resolution: Resolution::default(),
        };

        for &source in sources {
            walk.visit(None, source)?;
        }

        Ok(walk.resolution)
    }
}

struct Walk<'a, G: ?Sized> {
    options: &'a ResolverOptions,
    graph: &'a mut G,
    output: OutputId,
    stack: Vec<SourceId>,
    on_stack: HashSet<SourceId>,
    placed: HashSet<SourceId>,
    /// Packages already reported as built too late, reported once each
    late_packages: HashSet<OutputId>,
    resolution: Resolution,
}

impl<G: DependencyGraph + ?Sized> Walk<'_, G> {
    fn visit(&mut self, dependent: Option<SourceId>, file: SourceId) -> PackResult<()> {
        if self.on_stack.contains(&file) {
            if self.options.detect_cycles {
                self.report_cycle(file);
            }
            return Ok(());
        }
        if self.placed.contains(&file) {
            return Ok(());
        }

        let owner = self.graph.owner(file);
        match owner {
            Some(other) if other != self.output => {
                if self.options.enforce_cross_package_order
                    && !self.graph.is_finished(other)
                    && self.late_packages.insert(other)
                {
                    let problem = PackError::CrossPackageOrder {
                        dependent: self.name_of(dependent.unwrap_or(file)),
                        package: self.graph.output_name(self.output),
                        dependency: self.graph.source_name(file),
                        dependency_package: self.graph.output_name(other),
                    };
                    self.resolution.problems.push(problem);
                }
                return Ok(());
            }
            None if !self.options.auto_adopt_unassigned => {
                if self.options.error_on_unassigned {
                    let problem = PackError::UnassignedDependency {
                        dependent: self.name_of(dependent.unwrap_or(file)),
                        package: self.graph.output_name(self.output),
                        dependency: self.graph.source_name(file),
                    };
                    self.resolution.problems.push(problem);
                }
                return Ok(());
            }
            _ => {}
        }

        self.stack.push(file);
        self.on_stack.insert(file);
        for dependency in self.graph.dependencies(file)? {
            self.visit(Some(file), dependency)?;
        }
        self.stack.pop();
        self.on_stack.remove(&file);

        if owner.is_none() {
            self.graph.adopt(file, self.output)?;
            self.resolution.adopted.push(file);
        }
        self.placed.insert(file);
        self.resolution.order.push(file);
        Ok(())
    }

    fn report_cycle(&mut self, file: SourceId) {
        let start = self.stack.iter().position(|s| *s == file).unwrap_or(0);
        let mut chain: Vec<String> = self.stack[start..]
            .iter()
            .map(|s| self.graph.source_name(*s))
            .collect();
        chain.push(self.graph.source_name(file));
        self.resolution.problems.push(PackError::Cycle { chain });
    }

    fn name_of(&self, source: SourceId) -> String {
        self.graph.source_name(source)
    }
}
