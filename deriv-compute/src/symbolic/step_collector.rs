/// A sink for the steps an algorithm reports as it runs, such as the rules applied by the
/// simplifier or the lines of a derivation's explanation.
///
/// Pass `&mut ()` to discard the steps, or a `&mut Vec<S>` to keep them in order.
pub trait StepCollector<S> {
    /// Records a step.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn count_to(n: u8, collector: &mut dyn StepCollector<u8>) {
        (1..=n).for_each(|i| collector.push(i));
    }

    #[test]
    fn vec_keeps_order() {
        let mut steps = Vec::new();
        count_to(3, &mut steps);
        assert_eq!(steps, vec![1, 2, 3]);
        count_to(3, &mut ());
    }
}
