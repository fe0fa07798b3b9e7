use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub label: &'static str,
    pub style_tag: &'static str,
    pub message: &'static str,
}

/// Fixed, ordered set of fortunes a draw picks from.
#[derive(Debug)]
pub struct OutcomeTable([Outcome; 6]);

pub static OUTCOMES: OutcomeTable = OutcomeTable([
    Outcome {
        label: "大吉",
        style_tag: "daikichi",
        message: "今日は最高の一日になりそうです！\n新しいことに挑戦するのに最適な日。\n積極的に行動すれば、きっと良い結果が待っています。",
    },
    Outcome {
        label: "吉",
        style_tag: "kichi",
        message: "穏やかで良い一日になりそうです。\n小さな幸せを見つけることができるでしょう。\n周りの人への感謝を忘れずに。",
    },
    Outcome {
        label: "中吉",
        style_tag: "chukichi",
        message: "まずまずの運勢です。\n慎重に行動すれば良い結果が得られそう。\n焦らず一歩ずつ進んでいきましょう。",
    },
    Outcome {
        label: "小吉",
        style_tag: "shokichi",
        message: "小さな幸運が舞い込みそうです。\n見落としがちな良いことに気づけるかも。\n丁寧に過ごすことを心がけてください。",
    },
    Outcome {
        label: "凶",
        style_tag: "kyo",
        message: "今日は少し注意が必要かもしれません。\nでも、困難は成長の機会です。\n前向きな気持ちで乗り越えていきましょう。",
    },
    Outcome {
        label: "大凶",
        style_tag: "daikyo",
        message: "今日は慎重に過ごしましょう。\nピンチはチャンス！きっと明日は良い日になります。\n今は準備の時期と考えて、じっくり取り組みましょう。",
    },
]);

impl OutcomeTable {
    #[inline]
    pub const fn size(&self) -> usize {
        self.0.len()
    }

    /// Indices come from [`OutcomeTable::sample`] or iteration and are always in range.
    #[inline]
    pub fn at(&self, index: usize) -> &Outcome {
        &self.0[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.0.iter()
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.0.iter().position(|outcome| outcome.label == label)
    }

    /// Uniform pick, independent of any previous draw.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &Outcome {
        self.at(rng.gen_range(0..self.size()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn table_has_six_distinct_entries() {
        assert_eq!(OUTCOMES.size(), 6);
        let labels: HashSet<_> = OUTCOMES.iter().map(|o| o.label).collect();
        let tags: HashSet<_> = OUTCOMES.iter().map(|o| o.style_tag).collect();
        assert_eq!(labels.len(), 6);
        assert_eq!(tags.len(), 6);
    }

    #[test]
    fn labels_pair_with_their_style_tag() {
        let expected = [
            ("大吉", "daikichi"),
            ("吉", "kichi"),
            ("中吉", "chukichi"),
            ("小吉", "shokichi"),
            ("凶", "kyo"),
            ("大凶", "daikyo"),
        ];
        for (index, (label, tag)) in expected.into_iter().enumerate() {
            let outcome = OUTCOMES.at(index);
            assert_eq!(outcome.label, label);
            assert_eq!(outcome.style_tag, tag);
            assert_eq!(OUTCOMES.position(label), Some(index));
        }
        assert_eq!(OUTCOMES.position("末吉"), None);
    }

    #[test]
    fn messages_are_multiline_and_punctuated() {
        for outcome in OUTCOMES.iter() {
            assert!(outcome.message.chars().count() > 10);
            assert_eq!(outcome.message.lines().count(), 3);
            assert!(outcome.message.ends_with('。') || outcome.message.ends_with('！'));
        }
    }

    #[test]
    fn sampling_reaches_every_outcome() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut counts = [0usize; 6];
        for _ in 0..600 {
            let outcome = OUTCOMES.sample(&mut rng);
            counts[OUTCOMES.position(outcome.label).unwrap()] += 1;
        }
        assert_eq!(counts.iter().sum::<usize>(), 600);
        assert!(counts.iter().all(|&count| count > 0), "{counts:?}");
    }
}
