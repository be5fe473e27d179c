use std::ops::ControlFlow;

/// A computation advanced one step at a time against a read-only context.
///
/// Every step either breaks with the final outcome `B` or continues with a
/// progress value `C`.
pub trait Step<Ctx, B, C = ()> {
    type Error;

    fn step(&mut self, context: &Ctx) -> Result<ControlFlow<B, C>, Self::Error>;

    fn finish(&mut self, context: &Ctx) -> Result<B, Self::Error> {
        loop {
            if let ControlFlow::Break(outcome) = self.step(context)? {
                return Ok(outcome);
            }
        }
    }
}
