//! The [`SolvingEngine`] backed by the Pumpkin lazy clause generation solver.
//!
//! Every call to [`PumpkinEngine::solve`] translates the [`Model`] into a fresh [`Solver`] and
//! maximises the objective with Pumpkin's linear SAT-UNSAT search, which tightens the objective
//! after every solution until no better solution exists or a limit triggers.
use log::debug;
use pumpkin_core::constraints;
use pumpkin_core::constraints::Constraint;
use pumpkin_core::optimisation::linear_sat_unsat::LinearSatUnsat;
use pumpkin_core::optimisation::OptimisationDirection;
use pumpkin_core::results::OptimisationResult;
use pumpkin_core::results::ProblemSolution;
use pumpkin_core::results::SolutionReference;
use pumpkin_core::termination::TerminationCondition;
use pumpkin_core::variables::AffineView;
use pumpkin_core::variables::DomainId;
use pumpkin_core::variables::Literal;
use pumpkin_core::variables::TransformableVariable;
use pumpkin_core::ConstraintOperationError;
use pumpkin_core::DefaultBrancher;
use pumpkin_core::Solver;

use super::EngineError;
use super::LimitTracker;
use super::SolveLimits;
use super::SolveOutcome;
use super::SolvingEngine;
use crate::model::Assignment;
use crate::model::BoolLiteral;
use crate::model::IntVar;
use crate::model::IntervalVar;
use crate::model::LinearExpr;
use crate::model::Model;
use crate::model::ModelConstraint;
use crate::model::Operand;
use crate::model::Relation;

/// Solves [`Model`]s with Pumpkin. The engine is stateless; each invocation builds its own solver.
#[derive(Clone, Copy, Debug, Default)]
pub struct PumpkinEngine;

impl SolvingEngine for PumpkinEngine {
    fn solve(
        &mut self,
        model: &Model,
        objective: IntVar,
        limits: &SolveLimits,
    ) -> Result<SolveOutcome, EngineError> {
        let mut tracker = limits.start();

        let Lowering {
            mut solver,
            integers,
            booleans,
            ..
        } = match Lowering::lower(model) {
            Ok(lowering) => lowering,
            Err(LoweringError::Infeasible) => {
                debug!("Model is infeasible at the root");
                return Ok(SolveOutcome::Infeasible);
            }
            Err(LoweringError::Engine(error)) => return Err(error),
        };

        let objective_variable = integers[objective.index()];
        let mut brancher = solver.default_brancher();
        let mut termination = LimitTermination(&mut tracker);
        let callback = |_: &Solver, solution: SolutionReference<'_>, _: &DefaultBrancher| {
            debug!(
                "Found solution with objective {}",
                solution.get_integer_value(objective_variable)
            );
        };

        let result = solver.optimise(
            &mut brancher,
            &mut termination,
            LinearSatUnsat::new(OptimisationDirection::Maximise, objective_variable, callback),
        );

        Ok(match result {
            OptimisationResult::Optimal(solution) => {
                SolveOutcome::Optimal(extract_assignment(&solution, &integers, &booleans))
            }
            OptimisationResult::Satisfiable(solution) => {
                SolveOutcome::Feasible(extract_assignment(&solution, &integers, &booleans))
            }
            OptimisationResult::Unsatisfiable => SolveOutcome::Infeasible,
            OptimisationResult::Unknown => SolveOutcome::Unknown(termination.0.stop_reason()),
        })
    }
}

/// Adapts the engine-neutral [`LimitTracker`] to Pumpkin's [`TerminationCondition`].
#[derive(Debug)]
struct LimitTermination<'a>(&'a mut LimitTracker);

impl TerminationCondition for LimitTermination<'_> {
    fn should_stop(&mut self) -> bool {
        self.0.should_stop()
    }
}

fn extract_assignment(
    solution: &impl ProblemSolution,
    integers: &[DomainId],
    booleans: &[Literal],
) -> Assignment {
    Assignment::new(
        integers
            .iter()
            .map(|&domain| i64::from(solution.get_integer_value(domain)))
            .collect(),
        booleans
            .iter()
            .map(|&literal| solution.get_literal_value(literal))
            .collect(),
    )
}

enum LoweringError {
    /// Posting a constraint made the solver infeasible at the root.
    Infeasible,
    Engine(EngineError),
}

impl From<ConstraintOperationError> for LoweringError {
    fn from(_: ConstraintOperationError) -> Self {
        LoweringError::Infeasible
    }
}

impl From<EngineError> for LoweringError {
    fn from(error: EngineError) -> Self {
        LoweringError::Engine(error)
    }
}

/// The translation of a [`Model`] into a Pumpkin [`Solver`].
struct Lowering<'model> {
    model: &'model Model,
    solver: Solver,
    integers: Vec<DomainId>,
    booleans: Vec<Literal>,
}

impl<'model> Lowering<'model> {
    fn lower(model: &'model Model) -> Result<Lowering<'model>, LoweringError> {
        let mut solver = Solver::default();

        let integers = model
            .integers()
            .map(|(_, domain)| {
                let lower_bound = to_i32(domain.lower_bound, || domain.name.clone())?;
                let upper_bound = to_i32(domain.upper_bound, || domain.name.clone())?;
                Ok(solver.new_bounded_integer(lower_bound, upper_bound))
            })
            .collect::<Result<Vec<_>, EngineError>>()?;
        let booleans = (0..model.num_booleans())
            .map(|_| solver.new_literal())
            .collect();

        let mut lowering = Lowering {
            model,
            solver,
            integers,
            booleans,
        };

        for constraint in model.constraints() {
            lowering.post_constraint(constraint)?;
        }

        debug!(
            "Lowered model with {} integers, {} booleans and {} constraints",
            model.num_integers(),
            model.num_booleans(),
            model.constraints().len()
        );

        Ok(lowering)
    }

    fn post_constraint(&mut self, constraint: &ModelConstraint) -> Result<(), LoweringError> {
        match constraint {
            ModelConstraint::Linear(linear) => {
                let enforcement = linear.enforcement.map(|literal| self.literal(literal));
                self.post_linear(&linear.expression, linear.relation, enforcement)
            }

            ModelConstraint::FloorDivision {
                quotient,
                numerator,
                divisor,
                enforcement,
            } => {
                // q == floor(n / d) with d > 0 is d * q <= n <= d * q + d - 1.
                let enforcement = enforcement.map(|literal| self.literal(literal));
                let scaled_quotient = LinearExpr::term(*divisor, *quotient);

                self.post_linear(
                    &(scaled_quotient.clone() - numerator.clone()),
                    Relation::LessThanOrEqual,
                    enforcement,
                )?;
                self.post_linear(
                    &(numerator.clone() - scaled_quotient - (*divisor - 1)),
                    Relation::LessThanOrEqual,
                    enforcement,
                )
            }

            ModelConstraint::GatedProduct {
                target,
                factor,
                gate,
            } => {
                let gate = self.literal((*gate).into());
                self.post_linear(
                    &(target.into_expr() - factor.clone()),
                    Relation::Equal,
                    Some(gate),
                )?;
                self.post_linear(&target.into_expr(), Relation::Equal, Some(!gate))
            }

            ModelConstraint::Clause(literals) => {
                let literals = literals
                    .iter()
                    .map(|&literal| self.literal(literal))
                    .collect::<Vec<_>>();
                self.post_clause(literals)
            }

            ModelConstraint::NoOverlap(intervals) => {
                for (index, first) in intervals.iter().enumerate() {
                    for second in &intervals[index + 1..] {
                        self.post_disjunction(first, second)?;
                    }
                }
                Ok(())
            }
        }
    }

    /// Posts `expression <relation> 0`, half-reified by `enforcement`.
    fn post_linear(
        &mut self,
        expression: &LinearExpr,
        relation: Relation,
        enforcement: Option<Literal>,
    ) -> Result<(), LoweringError> {
        self.check_magnitude(expression)?;

        let terms = expression
            .terms()
            .iter()
            .filter(|&&(coefficient, _)| coefficient != 0)
            .map(|&(coefficient, operand)| {
                let coefficient = to_i32(coefficient, || format!("coefficient of {operand:?}"))?;
                Ok(self.view(operand).scaled(coefficient))
            })
            .collect::<Result<Vec<AffineView<DomainId>>, EngineError>>()?;

        if terms.is_empty() {
            let holds = match relation {
                Relation::LessThanOrEqual => expression.offset() <= 0,
                Relation::Equal => expression.offset() == 0,
            };
            return match (holds, enforcement) {
                (true, _) => Ok(()),
                (false, Some(literal)) => self.post_clause(vec![!literal]),
                (false, None) => Err(LoweringError::Infeasible),
            };
        }

        let rhs = to_i32(-expression.offset(), || "right-hand side".to_owned())?;
        let tag = self.solver.new_constraint_tag();
        match relation {
            Relation::LessThanOrEqual => {
                self.post(constraints::less_than_or_equals(terms, rhs, tag), enforcement)
            }
            Relation::Equal => self.post(constraints::equals(terms, rhs, tag), enforcement),
        }
    }

    fn post(
        &mut self,
        constraint: impl Constraint,
        enforcement: Option<Literal>,
    ) -> Result<(), LoweringError> {
        match enforcement {
            Some(literal) => constraint.implied_by(&mut self.solver, literal)?,
            None => constraint.post(&mut self.solver)?,
        }
        Ok(())
    }

    fn post_clause(&mut self, literals: Vec<Literal>) -> Result<(), LoweringError> {
        if literals.is_empty() {
            return Err(LoweringError::Infeasible);
        }

        let tag = self.solver.new_constraint_tag();
        constraints::clause(literals, tag).post(&mut self.solver)?;
        Ok(())
    }

    /// Posts that `first` and `second` do not overlap when both are present, by choosing one of
    /// the two orders.
    fn post_disjunction(
        &mut self,
        first: &IntervalVar,
        second: &IntervalVar,
    ) -> Result<(), LoweringError> {
        if first.is_fixed() && second.is_fixed() {
            return Ok(());
        }
        if self.always_precedes(first, second) || self.always_precedes(second, first) {
            return Ok(());
        }

        let first_before_second = self.solver.new_literal();
        let second_before_first = self.solver.new_literal();

        self.post_linear(
            &(first.end() - second.start().clone()),
            Relation::LessThanOrEqual,
            Some(first_before_second),
        )?;
        self.post_linear(
            &(second.end() - first.start().clone()),
            Relation::LessThanOrEqual,
            Some(second_before_first),
        )?;

        let mut clause = vec![first_before_second, second_before_first];
        clause.extend(
            [first.presence(), second.presence()]
                .into_iter()
                .flatten()
                .map(|presence| !self.literal(presence.into())),
        );
        self.post_clause(clause)
    }

    /// Returns `true` if every placement of `first` ends before every placement of `second`
    /// starts.
    fn always_precedes(&self, first: &IntervalVar, second: &IntervalVar) -> bool {
        let (_, latest_end) = self.bounds(&first.end());
        let (earliest_start, _) = self.bounds(second.start());
        latest_end <= earliest_start
    }

    fn bounds(&self, expression: &LinearExpr) -> (i128, i128) {
        expression.terms().iter().fold(
            (
                i128::from(expression.offset()),
                i128::from(expression.offset()),
            ),
            |(lower, upper), &(coefficient, operand)| {
                let (operand_lower, operand_upper) = self.operand_bounds(operand);
                let coefficient = i128::from(coefficient);
                let a = coefficient * operand_lower;
                let b = coefficient * operand_upper;
                (lower + a.min(b), upper + a.max(b))
            },
        )
    }

    fn operand_bounds(&self, operand: Operand) -> (i128, i128) {
        match operand {
            Operand::Integer(variable) => {
                let domain = self.model.integer_domain(variable);
                (
                    i128::from(domain.lower_bound),
                    i128::from(domain.upper_bound),
                )
            }
            Operand::Boolean(_) => (0, 1),
        }
    }

    /// Rejects linear terms whose scaled bounds leave the 32-bit range of the solver's integer
    /// views. The linear propagators accumulate the terms in 64 bits, so only single terms are
    /// bounded.
    fn check_magnitude(&self, expression: &LinearExpr) -> Result<(), EngineError> {
        for &(coefficient, operand) in expression.terms() {
            let (lower, upper) = self.operand_bounds(operand);
            let magnitude = i128::from(coefficient).abs() * lower.abs().max(upper.abs());

            if magnitude > i128::from(i32::MAX) {
                return Err(EngineError::ValueOutOfRange {
                    context: format!("term {coefficient} * {operand:?}"),
                    magnitude,
                });
            }
        }
        Ok(())
    }

    fn view(&self, operand: Operand) -> AffineView<DomainId> {
        match operand {
            Operand::Integer(variable) => self.integers[variable.index()].scaled(1),
            Operand::Boolean(variable) => self.booleans[variable.index()].get_integer_variable(),
        }
    }

    fn literal(&self, literal: BoolLiteral) -> Literal {
        let solver_literal = self.booleans[literal.variable().index()];
        if literal.is_positive() {
            solver_literal
        } else {
            !solver_literal
        }
    }
}

fn to_i32(value: i64, context: impl FnOnce() -> String) -> Result<i32, EngineError> {
    i32::try_from(value).map_err(|_| EngineError::ValueOutOfRange {
        context: context(),
        magnitude: i128::from(value),
    })
}
